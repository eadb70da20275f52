use egui::{Context, InnerResponse, Margin, RichText};


pub fn info_gui(ui: &Context) -> InnerResponse<()> {

    egui::SidePanel::right("Info")
        .frame(egui::Frame::default()
            .fill(egui::Color32::from_black_alpha(200))
            .inner_margin(Margin{ left:10.0, right:10.0, top:10.0, bottom:10.0})
            )
        .show(ui, |ui| {
            ui.heading("Info");
            ui.label(RichText::new("Scenes").strong());
            ui.label("Open: type a path in the top bar and press Enter");
            ui.label("Open: drop a scene file onto the window");
            ui.label(RichText::new("Startup").strong());
            ui.label("scene_editor [SCENE] opens SCENE directly");
            ui.label("Without SCENE the bundled material test is opened");
            ui.label(RichText::new("Exit").strong());
            ui.label("Close Editor: 'ESC'");
        })
}
