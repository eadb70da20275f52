/*!
# Scene Editor

Interactive editor for ray-traced scenes, built on [wgpu](https://docs.rs/wgpu/latest/wgpu/),
[winit](https://docs.rs/winit/latest/winit/) and [egui](https://github.com/emilk/egui).

## Overview

This crate is the process entry point. Before the first window appears it
sizes a pool of render worker threads (one less than the available
parallelism, at least one), initializes the ray-tracing kernel and binds the
workers to it, and brings up the volumetric engine when built with the
`volume` feature. It then fixes the default graphics surface attributes,
anchors the working directory at the executable, applies the editor style
sheet, opens a window covering the primary screen minus a margin and loads
the initial scene.

## Modules

- [`editor_lib`](../editor_lib/index.html): startup orchestration, settings and the main window.
- [`engines`](../engines/index.html): worker pool, ray-tracing kernel and volumetric engine.
- [`wgpu_utils`](../wgpu_utils/index.html): surface defaults and GPU setup.
- [`gui`](../gui/index.html): windowing contract, style sheets and editor panels.
- [`scene`](../scene/index.html): scene file loading.

## Usage

```sh
scene_editor                          # opens data/materialtest/materialtest.toml if present
scene_editor scenes/cornell.toml      # opens the given scene
scene_editor --threads 4 --log-level debug
cargo run --features volume           # with the volumetric engine
```

Settings live in `data/editor/editor.toml` next to the executable; every key is optional.

## Exit codes

- `0`: the window was closed.
- `1`: the event loop failed; the reason is printed to stderr.
- non-zero with an error chain: the engines or the window could not be brought up.
*/

pub use editor_lib::{run, CliArgs};
