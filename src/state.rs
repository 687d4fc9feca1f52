#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LoadPhase {
    Loading, // Frames still resolving; the backdrop is hidden
    Ready,   // Every frame resolved (loaded or failed); terminal
}
