//! Live control panel
//!
//! A [`ControlPanel`] is a tree of named folders holding numeric and boolean
//! controls. Controls do not own the values they edit: a numeric or boolean
//! control is bound to a field of some [`ControlSink`], and every edit is
//! written straight through to it. The one exception is a *local* numeric
//! control, which keeps its own value and relies on its change callback to
//! push the value somewhere.
//!
//! Change callbacks run synchronously, after the value has been clamped and
//! stored, and receive the sink so they can make further edits.
//!
//! The panel only models controls. Drawing is done by
//! [`show_panel`](crate::show_panel), which lays the folder tree out with egui.

use std::fmt;

/// Something whose fields a panel can edit
pub trait ControlSink {
    /// Identifies a numeric field
    type NumberField: Copy + fmt::Debug;
    /// Identifies a boolean field
    type FlagField: Copy + fmt::Debug;

    fn read_number(&self, field: Self::NumberField) -> f32;
    fn write_number(&mut self, field: Self::NumberField, value: f32);
    fn read_flag(&self, field: Self::FlagField) -> bool;
    fn write_flag(&mut self, field: Self::FlagField, value: bool);
}

/// Callback invoked after a numeric edit
pub type NumberCallback<S> = Box<dyn FnMut(&mut S, f32)>;
/// Callback invoked after a boolean edit
pub type FlagCallback<S> = Box<dyn FnMut(&mut S, bool)>;

/// Handle to a folder in a panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FolderId(usize);

/// Handle to a control in a panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControlId(usize);

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two kinds of control
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    Numeric,
    Boolean,
}

/// Current value of a control
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlValue {
    Number(f32),
    Flag(bool),
}

impl ControlValue {
    pub fn as_number(self) -> Option<f32> {
        match self {
            ControlValue::Number(v) => Some(v),
            ControlValue::Flag(_) => None,
        }
    }

    pub fn as_flag(self) -> Option<bool> {
        match self {
            ControlValue::Flag(v) => Some(v),
            ControlValue::Number(_) => None,
        }
    }
}

impl fmt::Display for ControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlValue::Number(v) => write!(f, "{:.2}", v),
            ControlValue::Flag(true) => write!(f, "[x]"),
            ControlValue::Flag(false) => write!(f, "[ ]"),
        }
    }
}

/// Panel errors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelError {
    /// The id does not belong to this panel
    UnknownControl(ControlId),
    /// A numeric operation on a boolean control or vice versa
    KindMismatch {
        control: ControlId,
        expected: ControlKind,
    },
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelError::UnknownControl(id) => write!(f, "Unknown control {}", id),
            PanelError::KindMismatch { control, expected } => {
                write!(f, "Control {} is not {:?}", control, expected)
            }
        }
    }
}

impl std::error::Error for PanelError {}

/// One line of the panel, for logging
#[derive(Clone, Debug, PartialEq)]
pub struct PanelRow {
    pub id: ControlId,
    /// Folder names from the top level down, joined with '/'
    pub path: String,
    pub label: String,
    pub value: ControlValue,
}

impl fmt::Display for PanelRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.label, self.value)
        } else {
            write!(f, "{} / {}: {}", self.path, self.label, self.value)
        }
    }
}

/// An item inside a folder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelEntry {
    Folder(FolderId),
    Control(ControlId),
}

struct Folder {
    name: String,
    parent: Option<FolderId>,
    /// Sub-folders and controls in creation order
    entries: Vec<PanelEntry>,
}

enum NumberSource<F> {
    Field(F),
    Local(f32),
}

enum Binding<S: ControlSink> {
    Number {
        source: NumberSource<S::NumberField>,
        min: f32,
        max: f32,
        on_change: Option<NumberCallback<S>>,
    },
    Flag {
        field: S::FlagField,
        on_change: Option<FlagCallback<S>>,
    },
}

struct Control<S: ControlSink> {
    label: String,
    folder: FolderId,
    binding: Binding<S>,
}

/// Tree of folders and controls editing a sink of type `S`
pub struct ControlPanel<S: ControlSink> {
    folders: Vec<Folder>,
    controls: Vec<Control<S>>,
}

impl<S: ControlSink> Default for ControlPanel<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ControlSink> ControlPanel<S> {
    /// Create an empty panel with just the top-level folder
    pub fn new() -> Self {
        Self {
            folders: vec![Folder {
                name: String::new(),
                parent: None,
                entries: Vec::new(),
            }],
            controls: Vec::new(),
        }
    }

    /// The unnamed top-level folder
    #[inline]
    pub fn root(&self) -> FolderId {
        FolderId(0)
    }

    /// Add a named folder under `parent`.
    ///
    /// An unknown `parent` falls back to the top-level folder.
    pub fn add_folder(&mut self, name: impl Into<String>, parent: FolderId) -> FolderId {
        let parent = self.known_folder(parent);
        let id = FolderId(self.folders.len());
        self.folders.push(Folder {
            name: name.into(),
            parent: Some(parent),
            entries: Vec::new(),
        });
        self.folders[parent.0].entries.push(PanelEntry::Folder(id));
        id
    }

    /// Bind a numeric field, editable within `[min, max]`
    pub fn bind_numeric(
        &mut self,
        folder: FolderId,
        field: S::NumberField,
        min: f32,
        max: f32,
        label: impl Into<String>,
    ) -> ControlId {
        let (min, max) = ordered(min, max);
        self.push(label.into(), folder, Binding::Number {
            source: NumberSource::Field(field),
            min,
            max,
            on_change: None,
        })
    }

    /// Add a numeric control that holds its own value
    pub fn add_local_numeric(
        &mut self,
        folder: FolderId,
        initial: f32,
        min: f32,
        max: f32,
        label: impl Into<String>,
    ) -> ControlId {
        let (min, max) = ordered(min, max);
        self.push(label.into(), folder, Binding::Number {
            source: NumberSource::Local(initial.clamp(min, max)),
            min,
            max,
            on_change: None,
        })
    }

    /// Bind a boolean field
    pub fn bind_boolean(
        &mut self,
        folder: FolderId,
        field: S::FlagField,
        label: impl Into<String>,
    ) -> ControlId {
        self.push(label.into(), folder, Binding::Flag {
            field,
            on_change: None,
        })
    }

    /// Set the callback run after every edit of a numeric control
    pub fn on_numeric_change(
        &mut self,
        id: ControlId,
        callback: impl FnMut(&mut S, f32) + 'static,
    ) -> Result<(), PanelError> {
        match &mut self.control_mut(id)?.binding {
            Binding::Number { on_change, .. } => {
                *on_change = Some(Box::new(callback));
                Ok(())
            }
            Binding::Flag { .. } => Err(mismatch(id, ControlKind::Numeric)),
        }
    }

    /// Set the callback run after every edit of a boolean control
    pub fn on_boolean_change(
        &mut self,
        id: ControlId,
        callback: impl FnMut(&mut S, bool) + 'static,
    ) -> Result<(), PanelError> {
        match &mut self.control_mut(id)?.binding {
            Binding::Flag { on_change, .. } => {
                *on_change = Some(Box::new(callback));
                Ok(())
            }
            Binding::Number { .. } => Err(mismatch(id, ControlKind::Boolean)),
        }
    }

    /// Edit a numeric control. Returns the value after clamping.
    pub fn set_numeric(&mut self, sink: &mut S, id: ControlId, value: f32) -> Result<f32, PanelError> {
        let control = self.control_mut(id)?;
        let Binding::Number { source, min, max, on_change } = &mut control.binding else {
            return Err(mismatch(id, ControlKind::Numeric));
        };

        let value = value.clamp(*min, *max);
        match source {
            NumberSource::Field(field) => sink.write_number(*field, value),
            NumberSource::Local(local) => *local = value,
        }
        log::debug!("Control '{}' = {:.3}", control.label, value);

        if let Some(callback) = on_change.as_mut() {
            callback(sink, value);
        }
        Ok(value)
    }

    /// Edit a boolean control
    pub fn set_boolean(&mut self, sink: &mut S, id: ControlId, value: bool) -> Result<(), PanelError> {
        let control = self.control_mut(id)?;
        let Binding::Flag { field, on_change } = &mut control.binding else {
            return Err(mismatch(id, ControlKind::Boolean));
        };

        sink.write_flag(*field, value);
        log::debug!("Control '{}' = {}", control.label, value);

        if let Some(callback) = on_change.as_mut() {
            callback(sink, value);
        }
        Ok(())
    }

    /// Current value of a control
    pub fn value(&self, sink: &S, id: ControlId) -> Result<ControlValue, PanelError> {
        let control = self.control(id)?;
        Ok(match &control.binding {
            Binding::Number { source: NumberSource::Field(field), .. } => {
                ControlValue::Number(sink.read_number(*field))
            }
            Binding::Number { source: NumberSource::Local(value), .. } => ControlValue::Number(*value),
            Binding::Flag { field, .. } => ControlValue::Flag(sink.read_flag(*field)),
        })
    }

    /// Range of a numeric control
    pub fn range(&self, id: ControlId) -> Result<(f32, f32), PanelError> {
        match &self.control(id)?.binding {
            Binding::Number { min, max, .. } => Ok((*min, *max)),
            Binding::Flag { .. } => Err(mismatch(id, ControlKind::Numeric)),
        }
    }

    pub fn kind(&self, id: ControlId) -> Result<ControlKind, PanelError> {
        Ok(match self.control(id)?.binding {
            Binding::Number { .. } => ControlKind::Numeric,
            Binding::Flag { .. } => ControlKind::Boolean,
        })
    }

    pub fn label(&self, id: ControlId) -> Result<&str, PanelError> {
        Ok(&self.control(id)?.label)
    }

    /// Folder names from the top level down to `folder`, joined with '/'
    pub fn folder_path(&self, folder: FolderId) -> String {
        let mut names = Vec::new();
        let mut current = Some(folder);
        while let Some(FolderId(index)) = current {
            let Some(f) = self.folders.get(index) else { break };
            if !f.name.is_empty() {
                names.push(f.name.as_str());
            }
            current = f.parent;
        }
        names.reverse();
        names.join("/")
    }

    /// Look up a control by folder path and label
    pub fn find(&self, path: &str, label: &str) -> Option<ControlId> {
        self.controls
            .iter()
            .position(|c| c.label == label && self.folder_path(c.folder) == path)
            .map(ControlId)
    }

    /// Number of controls
    #[inline]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Name of a folder; empty for the top level and unknown ids
    pub fn folder_name(&self, folder: FolderId) -> &str {
        self.folders.get(folder.0).map(|f| f.name.as_str()).unwrap_or("")
    }

    /// Sub-folders and controls of `folder`, in creation order
    pub fn entries(&self, folder: FolderId) -> &[PanelEntry] {
        self.folders
            .get(folder.0)
            .map(|f| f.entries.as_slice())
            .unwrap_or(&[])
    }

    /// Every control in creation order, for logging
    pub fn rows(&self, sink: &S) -> Vec<PanelRow> {
        self.controls
            .iter()
            .enumerate()
            .filter_map(|(index, control)| {
                let id = ControlId(index);
                let value = self.value(sink, id).ok()?;
                Some(PanelRow {
                    id,
                    path: self.folder_path(control.folder),
                    label: control.label.clone(),
                    value,
                })
            })
            .collect()
    }

    fn push(&mut self, label: String, folder: FolderId, binding: Binding<S>) -> ControlId {
        let folder = self.known_folder(folder);
        let id = ControlId(self.controls.len());
        self.controls.push(Control { label, folder, binding });
        self.folders[folder.0].entries.push(PanelEntry::Control(id));
        id
    }

    fn known_folder(&self, folder: FolderId) -> FolderId {
        if folder.0 < self.folders.len() {
            folder
        } else {
            log::warn!("Unknown panel folder {:?}, using the top level", folder);
            self.root()
        }
    }

    fn control(&self, id: ControlId) -> Result<&Control<S>, PanelError> {
        self.controls.get(id.0).ok_or(PanelError::UnknownControl(id))
    }

    fn control_mut(&mut self, id: ControlId) -> Result<&mut Control<S>, PanelError> {
        self.controls.get_mut(id.0).ok_or(PanelError::UnknownControl(id))
    }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}

fn mismatch(control: ControlId, expected: ControlKind) -> PanelError {
    PanelError::KindMismatch { control, expected }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Fields {
        numbers: [f32; 2],
        flags: [bool; 2],
        log: Vec<String>,
    }

    impl ControlSink for Fields {
        type NumberField = usize;
        type FlagField = usize;

        fn read_number(&self, field: usize) -> f32 {
            self.numbers[field]
        }
        fn write_number(&mut self, field: usize, value: f32) {
            self.numbers[field] = value;
        }
        fn read_flag(&self, field: usize) -> bool {
            self.flags[field]
        }
        fn write_flag(&mut self, field: usize, value: bool) {
            self.flags[field] = value;
        }
    }

    #[test]
    fn test_numeric_clamps_and_writes_through() {
        let mut panel: ControlPanel<Fields> = ControlPanel::new();
        let mut sink = Fields::default();
        let folder = panel.add_folder("Position", panel.root());
        let x = panel.bind_numeric(folder, 0, -10.0, 10.0, "X");

        assert_eq!(panel.set_numeric(&mut sink, x, 3.5).unwrap(), 3.5);
        assert_eq!(sink.numbers[0], 3.5);

        assert_eq!(panel.set_numeric(&mut sink, x, 42.0).unwrap(), 10.0);
        assert_eq!(sink.numbers[0], 10.0);
        assert_eq!(panel.set_numeric(&mut sink, x, -42.0).unwrap(), -10.0);
    }

    #[test]
    fn test_callback_sees_clamped_value_after_write() {
        let mut panel: ControlPanel<Fields> = ControlPanel::new();
        let mut sink = Fields::default();
        let x = panel.bind_numeric(panel.root(), 0, 0.0, 1.0, "X");
        panel
            .on_numeric_change(x, |sink: &mut Fields, v| {
                let stored = sink.numbers[0];
                sink.log.push(format!("{} {}", v, stored));
            })
            .unwrap();

        panel.set_numeric(&mut sink, x, 5.0).unwrap();
        assert_eq!(sink.log, vec!["1 1".to_string()]);
    }

    #[test]
    fn test_local_numeric_keeps_own_value() {
        let mut panel: ControlPanel<Fields> = ControlPanel::new();
        let mut sink = Fields::default();
        let scale = panel.add_local_numeric(panel.root(), 1.0, 0.1, 5.0, "Scale");
        panel
            .on_numeric_change(scale, |sink: &mut Fields, v| sink.numbers[1] = v * 2.0)
            .unwrap();

        assert_eq!(panel.value(&sink, scale).unwrap(), ControlValue::Number(1.0));
        panel.set_numeric(&mut sink, scale, 2.0).unwrap();
        assert_eq!(panel.value(&sink, scale).unwrap(), ControlValue::Number(2.0));
        assert_eq!(sink.numbers, [0.0, 4.0]);
    }

    #[test]
    fn test_local_initial_is_clamped() {
        let mut panel: ControlPanel<Fields> = ControlPanel::new();
        let sink = Fields::default();
        let id = panel.add_local_numeric(panel.root(), 0.0, 0.1, 5.0, "Scale");
        assert_eq!(panel.value(&sink, id).unwrap(), ControlValue::Number(0.1));
    }

    #[test]
    fn test_boolean_callback() {
        let mut panel: ControlPanel<Fields> = ControlPanel::new();
        let mut sink = Fields::default();
        let flag = panel.bind_boolean(panel.root(), 1, "Flag");
        panel
            .on_boolean_change(flag, |sink: &mut Fields, v| sink.log.push(v.to_string()))
            .unwrap();

        panel.set_boolean(&mut sink, flag, true).unwrap();
        panel.set_boolean(&mut sink, flag, false).unwrap();
        assert!(!sink.flags[1]);
        assert_eq!(sink.log, vec!["true".to_string(), "false".to_string()]);
    }

    #[test]
    fn test_kind_mismatch_and_unknown() {
        let mut panel: ControlPanel<Fields> = ControlPanel::new();
        let mut sink = Fields::default();
        let flag = panel.bind_boolean(panel.root(), 0, "Flag");
        let number = panel.bind_numeric(panel.root(), 0, 0.0, 1.0, "Number");

        assert_eq!(
            panel.set_numeric(&mut sink, flag, 1.0),
            Err(PanelError::KindMismatch { control: flag, expected: ControlKind::Numeric })
        );
        assert_eq!(
            panel.set_boolean(&mut sink, number, true),
            Err(PanelError::KindMismatch { control: number, expected: ControlKind::Boolean })
        );

        let stray = ControlId(99);
        assert_eq!(panel.value(&sink, stray), Err(PanelError::UnknownControl(stray)));
    }

    #[test]
    fn test_folder_paths_and_find() {
        let mut panel: ControlPanel<Fields> = ControlPanel::new();
        let cube = panel.add_folder("Cube Attributes", panel.root());
        let scale = panel.add_folder("Scale", cube);
        let id = panel.add_local_numeric(scale, 1.0, 0.1, 5.0, "Uniform Scale");
        let top = panel.bind_boolean(panel.root(), 0, "Group Objects");

        assert_eq!(panel.folder_path(scale), "Cube Attributes/Scale");
        assert_eq!(panel.folder_path(panel.root()), "");
        assert_eq!(panel.find("Cube Attributes/Scale", "Uniform Scale"), Some(id));
        assert_eq!(panel.find("", "Group Objects"), Some(top));
        assert_eq!(panel.find("Cube Attributes", "Uniform Scale"), None);
    }

    #[test]
    fn test_rows_display() {
        let mut panel: ControlPanel<Fields> = ControlPanel::new();
        let mut sink = Fields::default();
        let camera = panel.add_folder("Camera Position", panel.root());
        let z = panel.bind_numeric(camera, 1, -10.0, 10.0, "Z Position");
        panel.bind_boolean(panel.root(), 0, "Rotate Group");
        panel.set_numeric(&mut sink, z, 5.0).unwrap();

        let rows = panel.rows(&sink);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].to_string(), "Camera Position / Z Position: 5.00");
        assert_eq!(rows[1].to_string(), "Rotate Group: [ ]");
    }

    #[test]
    fn test_entries_keep_creation_order() {
        let mut panel: ControlPanel<Fields> = ControlPanel::new();
        let root = panel.root();
        let cube = panel.add_folder("Cube Attributes", root);
        let x = panel.bind_numeric(cube, 0, -10.0, 10.0, "X Position");
        let scale = panel.add_folder("Scale", cube);
        let uniform = panel.add_local_numeric(scale, 1.0, 0.1, 5.0, "Uniform Scale");
        let flag = panel.bind_boolean(root, 0, "Group Objects");

        assert_eq!(panel.entries(root), &[PanelEntry::Folder(cube), PanelEntry::Control(flag)]);
        assert_eq!(panel.entries(cube), &[PanelEntry::Control(x), PanelEntry::Folder(scale)]);
        assert_eq!(panel.entries(scale), &[PanelEntry::Control(uniform)]);
        assert_eq!(panel.folder_name(scale), "Scale");
        assert_eq!(panel.folder_name(root), "");
    }

    #[test]
    fn test_unknown_folder_falls_back_to_top_level() {
        let mut panel: ControlPanel<Fields> = ControlPanel::new();
        let stray = FolderId(42);
        let id = panel.bind_boolean(stray, 0, "Flag");

        assert_eq!(panel.entries(panel.root()), &[PanelEntry::Control(id)]);
        assert!(panel.entries(stray).is_empty());
    }

    #[test]
    fn test_control_value_accessors() {
        assert_eq!(ControlValue::Number(2.5).as_number(), Some(2.5));
        assert_eq!(ControlValue::Number(2.5).as_flag(), None);
        assert_eq!(ControlValue::Flag(true).as_flag(), Some(true));
        assert_eq!(ControlValue::Flag(true).as_number(), None);
    }
}
