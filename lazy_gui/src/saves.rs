// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Save files and the folder that lists them.
//!
//! The context keeps a [`SAVES_FOLDER`] whose children mirror the save directory: a
//! [`CREATE_NEW_SAVE`] button, an [`AUTOSAVE_ON_EXIT`] toggle, and one button per save that
//! loads it when pressed. Entries come and go through the folder's copy-on-write child list, so
//! a draw that is iterating the folder keeps its snapshot.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use lazy_state::{StateError, StateOverlay};
use lazy_tree::kinds::{Button, Toggle};
use lazy_tree::{Node, NodeClass, NodeKind};

use crate::gui::Gui;

/// Path of the folder listing save files.
pub const SAVES_FOLDER: &str = "saves";
/// Name of the button that writes a new timestamped save.
pub const CREATE_NEW_SAVE: &str = "create new save";
/// Name of the toggle that enables the autosave on exit.
pub const AUTOSAVE_ON_EXIT: &str = "autosave on exit";

impl Gui {
    /// Names of the saves in the save directory, sorted.
    pub fn list_saves(&self) -> Result<Vec<String>, StateError> {
        self.saves.list_saves()
    }

    /// Write the current state as the save called `name`.
    pub fn save(&mut self, name: &str) -> Result<PathBuf, StateError> {
        let document = StateOverlay::save(self.registry.root());
        let path = self.saves.save(name, &document)?;
        self.current_save = Some(name.to_owned());
        self.refresh_saves();
        Ok(path)
    }

    /// Write the current state under a fresh timestamp name. Returns the name.
    pub fn create_new_save(&mut self) -> Result<String, StateError> {
        let unix_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let document = StateOverlay::save(self.registry.root());
        let name = self.saves.create_new_save(&document, unix_secs)?;
        self.current_save = Some(name.clone());
        self.refresh_saves();
        Ok(name)
    }

    /// Apply the save called `name` to every live node and seed later declarations with it.
    ///
    /// Loading is an undoable action. On error nothing changes. Returns the number of nodes
    /// that were updated.
    pub fn load_save(&mut self, name: &str) -> Result<usize, StateError> {
        let document = self.saves.load(name)?;
        let applied = StateOverlay::apply_document(&document, self.registry.root());
        self.overlay.set_document(document);
        self.current_save = Some(name.to_owned());
        self.history.mark_action_boundary(self.registry.root());
        log::debug!("loaded save {name:?} into {applied} nodes");
        Ok(applied)
    }

    /// Whether [`shutdown`](Self::shutdown) writes the autosave.
    pub fn autosave_enabled(&self) -> bool {
        let path = lazy_path::join(SAVES_FOLDER, AUTOSAVE_ON_EXIT);
        self.registry
            .get(&path)
            .and_then(|n| n.with_kind(|k| k.as_toggle_mut().map(|t| t.value)))
            .unwrap_or(self.config.autosave_on_exit)
    }

    /// Write the autosave if it is enabled. Returns the file written.
    pub fn shutdown(&mut self) -> Result<Option<PathBuf>, StateError> {
        if !self.autosave_enabled() {
            return Ok(None);
        }
        let document = StateOverlay::save(self.registry.root());
        let path = self.saves.autosave(&document)?;
        log::debug!("autosaved to {}", path.display());
        Ok(Some(path))
    }

    /// Rebuild the saves folder from the save directory.
    pub fn refresh_saves(&mut self) {
        let names = match self.saves.list_saves() {
            Ok(names) => names,
            Err(err) => {
                log::warn!("cannot list saves: {err}");
                Vec::new()
            }
        };
        let autosave = self.config.autosave_on_exit;
        let fixed = [
            (CREATE_NEW_SAVE, NodeClass::Button),
            (AUTOSAVE_ON_EXIT, NodeClass::Toggle),
        ];
        for (name, class) in fixed {
            let path = lazy_path::join(SAVES_FOLDER, name);
            let declared = self.declare_at(&path, class, || match class {
                NodeClass::Toggle => NodeKind::Toggle(Toggle::new(autosave)),
                _ => NodeKind::Button(Button::default()),
            });
            if let Err(err) = declared {
                log::warn!("saves folder unavailable: {err}");
                return;
            }
        }

        let Some(folder) = self.registry.get(SAVES_FOLDER) else {
            return;
        };
        for child in folder.children().iter() {
            let stale = is_save_item(child) && !names.iter().any(|n| n == child.name());
            if stale {
                for removed in self.registry.remove(child.path()) {
                    self.forget(&removed);
                }
            }
        }
        for name in &names {
            let path = lazy_path::join(SAVES_FOLDER, name);
            if let Err(err) = self.declare_at(&path, NodeClass::Button, || {
                NodeKind::Button(Button::default())
            }) {
                log::warn!("cannot list save {name:?}: {err}");
            }
        }
    }

    /// Keep the saves folder alive while the host does not declare it.
    pub(crate) fn touch_saves(&self) {
        let Some(folder) = self.registry.get(SAVES_FOLDER) else {
            return;
        };
        for child in folder.children().iter() {
            self.registry.touch(child.path());
        }
    }

    /// React to a press on a button of the saves folder.
    pub(crate) fn on_save_button(&mut self, node: &Arc<Node>) {
        if !node.parent().is_some_and(|p| p.path() == SAVES_FOLDER) {
            return;
        }
        node.with_kind(|k| {
            if let Some(button) = k.as_button_mut() {
                button.take_clicked();
            }
        });
        if node.name() == CREATE_NEW_SAVE {
            if let Err(err) = self.create_new_save() {
                log::warn!("cannot create save: {err}");
            }
            return;
        }
        if let Err(err) = self.load_save(node.name()) {
            log::warn!("cannot load save {:?}: {err}", node.name());
        }
    }
}

fn is_save_item(node: &Node) -> bool {
    node.class() == NodeClass::Button && node.name() != CREATE_NEW_SAVE
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};
    use lazy_event_state::{InputEvent, PointerButton};

    use super::{AUTOSAVE_ON_EXIT, CREATE_NEW_SAVE, SAVES_FOLDER};
    use crate::{Gui, GuiConfig};

    fn temp_config(tag: &str) -> GuiConfig {
        let dir = std::env::temp_dir().join(format!("lazy_gui_saves_{tag}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        GuiConfig::default().with_save_dir(dir)
    }

    fn click(gui: &mut Gui, path: &str) {
        gui.begin_frame(0);
        assert!(gui.set_bounds(path, Rect::new(0.0, 0.0, 100.0, 20.0)));
        gui.end_frame();
        let position = Point::new(5.0, 5.0);
        gui.handle_event(InputEvent::PointerMoved { position });
        gui.handle_event(InputEvent::PointerPressed {
            position,
            button: PointerButton::Primary,
        });
        gui.handle_event(InputEvent::PointerReleased {
            position,
            button: PointerButton::Primary,
        });
    }

    #[test]
    fn saved_state_seeds_a_fresh_context() {
        let config = temp_config("roundtrip");
        let mut gui = Gui::headless(config.clone());
        gui.slider_set("scene/radius", 12.5).unwrap();
        gui.text_set("scene/title", "dusk").unwrap();
        gui.save("evening").unwrap();
        assert_eq!(gui.list_saves().unwrap(), ["evening"]);
        assert!(gui.registry().get("saves/evening").is_some());

        let mut fresh = Gui::headless(config.clone());
        assert_eq!(fresh.current_save(), Some("evening"));
        assert_eq!(fresh.slider("scene/radius").unwrap(), 12.5);
        assert_eq!(fresh.text("scene/title", "").unwrap(), "dusk");

        let mut ignoring = Gui::headless(config.clone().with_load_latest_save(false));
        assert_eq!(ignoring.slider("scene/radius").unwrap(), 0.0);
        let _ = std::fs::remove_dir_all(&config.save_dir);
    }

    #[test]
    fn failed_load_keeps_state() {
        let config = temp_config("missing");
        let mut gui = Gui::headless(config.clone());
        gui.slider_set("x", 4.0).unwrap();
        assert!(gui.load_save("nope").unwrap_err().is_not_found());
        assert!(gui.load_save("../escape").is_err());
        assert_eq!(gui.slider("x").unwrap(), 4.0);
        assert!(gui.list_saves().unwrap().is_empty());
        let _ = std::fs::remove_dir_all(&config.save_dir);
    }

    #[test]
    fn save_items_load_when_pressed() {
        let config = temp_config("items");
        let mut gui = Gui::headless(config.clone());
        gui.slider_set("x", 1.0).unwrap();
        let name = gui.create_new_save().unwrap();
        gui.slider_set("x", 5.0).unwrap();

        click(&mut gui, &lazy_path::join(SAVES_FOLDER, &name));
        assert_eq!(gui.slider("x").unwrap(), 1.0);
        assert_eq!(gui.current_save(), Some(name.as_str()));

        assert!(gui.undo());
        assert_eq!(gui.slider("x").unwrap(), 5.0);
        let _ = std::fs::remove_dir_all(&config.save_dir);
    }

    #[test]
    fn create_button_adds_an_item() {
        let config = temp_config("create");
        let mut gui = Gui::headless(config.clone());
        let before = gui.registry().get(SAVES_FOLDER).unwrap().children().len();

        click(&mut gui, &lazy_path::join(SAVES_FOLDER, CREATE_NEW_SAVE));
        let saves = gui.list_saves().unwrap();
        assert_eq!(saves.len(), 1);
        let folder = gui.registry().get(SAVES_FOLDER).unwrap();
        assert_eq!(folder.children().len(), before + 1);
        assert!(folder.find_child_by_name(&saves[0]).is_some());

        std::fs::remove_file(gui.saves.path_for(&saves[0])).unwrap();
        gui.refresh_saves();
        assert_eq!(folder.children().len(), before);
        let _ = std::fs::remove_dir_all(&config.save_dir);
    }

    #[test]
    fn shutdown_honors_the_autosave_toggle() {
        let config = temp_config("autosave");
        let mut gui = Gui::headless(config.clone());
        assert!(gui.autosave_enabled());
        let path = gui.shutdown().unwrap().unwrap();
        assert!(path.ends_with("auto.json"));

        gui.toggle_set(&lazy_path::join(SAVES_FOLDER, AUTOSAVE_ON_EXIT), false)
            .unwrap();
        assert!(gui.shutdown().unwrap().is_none());

        let disabled = Gui::headless(
            config
                .clone()
                .with_autosave_on_exit(false)
                .with_load_latest_save(false),
        );
        assert!(!disabled.autosave_enabled());
        let _ = std::fs::remove_dir_all(&config.save_dir);
    }
}
