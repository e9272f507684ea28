#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Redraw,

    // Palette
    Regenerate,
    Grow,
    Shrink,
    CycleFormat,
    Save,
    ToggleLock(usize),
    ToggleLockSelected,
    Copy(usize),
    CopySelected,

    // Cursor
    SelectPrev,
    SelectNext,
    Select(usize),

    // View
    ToggleBackground,
    ToggleHelp,
}
