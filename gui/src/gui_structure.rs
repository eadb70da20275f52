use std::path::{Path, PathBuf};

use egui::{Color32, Context, RichText};
use scene::SceneDocument;

use crate::gui_info::info_gui;

/// What the editor currently shows.
#[derive(Debug, Default)]
pub enum SceneStatus {
    #[default]
    Empty,
    Loaded {
        path: PathBuf,
        document: SceneDocument,
    },
    Failed {
        path: PathBuf,
        message: String,
    },
}

impl SceneStatus {
    /// File name of the loaded scene, for the window title.
    pub fn title(&self) -> Option<String> {
        match self {
            SceneStatus::Loaded { path, .. } => path.file_name().map(|name| name.to_string_lossy().into_owned()),
            _ => None,
        }
    }
}

pub struct GuiConfig {
    pub info_open: bool,
    pub scene_path: String,
    open_requested: Option<PathBuf>,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            info_open: false,
            scene_path: String::new(),
            open_requested: None,
        }
    }
}

impl GuiConfig {
    /// Queues the path typed into the scene field for opening.
    pub fn request_open(&mut self) {
        let path = self.scene_path.trim();
        if !path.is_empty() {
            self.open_requested = Some(PathBuf::from(path));
        }
    }

    pub fn take_open_request(&mut self) -> Option<PathBuf> {
        self.open_requested.take()
    }

    /// Mirrors a scene opened elsewhere (launch argument, dropped file) into the path field.
    pub fn show_path(&mut self, path: &Path) {
        self.scene_path = path.display().to_string();
    }
}

pub fn gui(ui: &Context, scene: &SceneStatus, fps: f32, gui_config: &mut GuiConfig) {
    // Top bar
    egui::TopBottomPanel::top("top").show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label("Scene:");
            let field = ui.text_edit_singleline(&mut gui_config.scene_path);
            let submitted = field.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));
            if ui.button("Open").clicked() || submitted {
                gui_config.request_open();
            }
            ui.separator();
            ui.toggle_value(&mut gui_config.info_open, "Info");
        });
    });

    // Status bar
    egui::TopBottomPanel::bottom("status").show(ui, |ui| {
        ui.horizontal(|ui| {
            let status = match scene {
                SceneStatus::Empty => "No scene".to_string(),
                SceneStatus::Loaded { path, .. } => path.display().to_string(),
                SceneStatus::Failed { path, .. } => format!("Failed to open {}", path.display()),
            };
            ui.label(status);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("FPS: {fps:.1}"));
            });
        });
    });

    egui::SidePanel::left("scene")
        .resizable(true)
        .default_width(260.0)
        .show(ui, |ui| {
            ui.heading("Scene");
            match scene {
                SceneStatus::Empty => {
                    ui.label("Open a scene file or drop one onto the window.");
                }
                SceneStatus::Failed { message, .. } => {
                    ui.colored_label(Color32::from_rgb(255, 80, 80), message.as_str());
                }
                SceneStatus::Loaded { document, .. } => scene_summary(ui, document),
            }
        });

    if gui_config.info_open {
        info_gui(ui);
    }
}

fn scene_summary(ui: &mut egui::Ui, document: &SceneDocument) {
    let camera = &document.camera;
    ui.label(RichText::new("Camera").strong());
    egui::Grid::new("camera").num_columns(2).show(ui, |ui| {
        ui.label("Position");
        ui.monospace(format!("{:?}", camera.position));
        ui.end_row();
        ui.label("Rotation");
        ui.monospace(format!("{:?}", camera.rotation));
        ui.end_row();
        ui.label("FOV");
        ui.monospace(format!("{:.1}", camera.fov));
        ui.end_row();
        ui.label("Near/Far");
        ui.monospace(format!("{:?}", camera.near_far));
        ui.end_row();
    });
    ui.separator();

    egui::Grid::new("contents").num_columns(2).show(ui, |ui| {
        ui.label("Materials");
        ui.label(document.materials.len().to_string());
        ui.end_row();
        ui.label("Spheres");
        ui.label(document.spheres.len().to_string());
        ui.end_row();
        ui.label("Texture sets");
        ui.label(document.textures.len().to_string());
        ui.end_row();
        ui.label("Background");
        ui.label(match &document.background {
            Some(background) => format!("material {} x{:.2}", background.material_id, background.intensity),
            None => "none".to_string(),
        });
        ui.end_row();
    });

    let models = document.model_paths.files();
    if !models.is_empty() {
        ui.separator();
        ui.collapsing("Models", |ui| {
            for model in models {
                ui.monospace(model);
            }
        });
    }
}
