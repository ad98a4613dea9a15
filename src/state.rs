//! Controller lifecycle

/// Where a panel controller is in its lifecycle.
///
/// ```text
/// Uninitialized --init--> Idle --set_frame_memory/clear--> Writing --> Idle
///                         Idle --display_frame--> Refreshing --> Idle
///                         Idle --sleep--> Asleep --init/wake_up--> Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelState {
    /// Constructed, but the panel was never reset and configured
    #[default]
    Uninitialized,
    /// Ready for RAM writes and refreshes
    Idle,
    /// A RAM stream is in progress
    Writing,
    /// A refresh was triggered and the busy line is being awaited
    Refreshing,
    /// Deep sleep, only a hardware reset (`init`/`wake_up`) brings it back
    Asleep,
}

impl PanelState {
    /// Whether the controller accepts RAM, LUT and refresh commands.
    ///
    /// `Writing` and `Refreshing` only persist if an operation was aborted by a bus error,
    /// the panel is still powered in that case.
    pub fn is_awake(&self) -> bool {
        !matches!(self, PanelState::Uninitialized | PanelState::Asleep)
    }
}

/// One of the two RAM planes inside the monochrome controller.
///
/// The controller swaps planes on every refresh, so the plane written by the next
/// `set_frame_memory`/`clear_frame_memory` is not the one that is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RamPlane {
    /// Plane targeted after a reset
    #[default]
    A,
    /// The other plane
    B,
}

impl RamPlane {
    /// The plane the controller switches to after a refresh
    pub fn other(&self) -> RamPlane {
        match self {
            RamPlane::A => RamPlane::B,
            RamPlane::B => RamPlane::A,
        }
    }
}
