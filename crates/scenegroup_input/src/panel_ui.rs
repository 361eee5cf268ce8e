//! egui view of a [`ControlPanel`]
//!
//! Folders become collapsing headers, numeric controls become sliders over
//! their range and boolean controls become checkboxes. Edits are applied
//! through [`ControlPanel::set_numeric`] and [`ControlPanel::set_boolean`], so
//! clamping and change callbacks run exactly as they do for edits made in code.

use crate::panel::{ControlId, ControlKind, ControlPanel, ControlSink, FolderId, PanelEntry, PanelError};

/// Draw every folder and control of `panel` into `ui`.
///
/// Returns the controls the user edited during this pass, in display order.
pub fn show_panel<S: ControlSink>(
    ui: &mut egui::Ui,
    panel: &mut ControlPanel<S>,
    sink: &mut S,
) -> Result<Vec<ControlId>, PanelError> {
    let mut edited = Vec::new();
    let root = panel.root();
    show_folder(ui, panel, sink, root, &mut edited)?;
    Ok(edited)
}

fn show_folder<S: ControlSink>(
    ui: &mut egui::Ui,
    panel: &mut ControlPanel<S>,
    sink: &mut S,
    folder: FolderId,
    edited: &mut Vec<ControlId>,
) -> Result<(), PanelError> {
    // Callbacks borrow the panel mutably, so walk a snapshot of the entries
    let entries = panel.entries(folder).to_vec();

    for entry in entries {
        match entry {
            PanelEntry::Control(id) => {
                if show_control(ui, panel, sink, id)? {
                    edited.push(id);
                }
            }
            PanelEntry::Folder(child) => {
                let name = panel.folder_name(child).to_owned();
                let shown = egui::CollapsingHeader::new(name)
                    .id_salt(child)
                    .default_open(false)
                    .show(ui, |ui| show_folder(ui, panel, sink, child, edited));
                if let Some(result) = shown.body_returned {
                    result?;
                }
            }
        }
    }
    Ok(())
}

fn show_control<S: ControlSink>(
    ui: &mut egui::Ui,
    panel: &mut ControlPanel<S>,
    sink: &mut S,
    id: ControlId,
) -> Result<bool, PanelError> {
    let label = panel.label(id)?.to_owned();
    let value = panel.value(sink, id)?;

    match panel.kind(id)? {
        ControlKind::Numeric => {
            let (min, max) = panel.range(id)?;
            let mut number = value.as_number().unwrap_or(min);
            let response = ui.add(egui::Slider::new(&mut number, min..=max).text(label));
            if response.changed() {
                panel.set_numeric(sink, id, number)?;
                return Ok(true);
            }
        }
        ControlKind::Boolean => {
            let mut checked = value.as_flag().unwrap_or_default();
            if ui.checkbox(&mut checked, label).changed() {
                panel.set_boolean(sink, id, checked)?;
                return Ok(true);
            }
        }
    }
    Ok(false)
}
