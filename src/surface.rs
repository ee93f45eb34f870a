//! Collaborators a tracker drives but does not own

use gaze_grid_input::Capability;

/// Whatever renders the selected image, e.g. an `<img>` element or a window
pub trait DisplaySurface {
    /// Show the image at `path` (base path + asset id)
    fn show(&mut self, path: &str);
}

/// Optional debug text next to the image. Its absence never changes what
/// the display shows
pub trait DiagnosticOverlay {
    fn report(&mut self, status: &str);
}

/// Platform consent flow for reading motion sensors
pub trait PermissionGate {
    fn request(&mut self) -> Capability;
}

impl<F> DisplaySurface for F
where
    F: FnMut(&str),
{
    fn show(&mut self, path: &str) {
        self(path)
    }
}

impl<F> DiagnosticOverlay for F
where
    F: FnMut(&str),
{
    fn report(&mut self, status: &str) {
        self(status)
    }
}

impl<F> PermissionGate for F
where
    F: FnMut() -> Capability,
{
    fn request(&mut self) -> Capability {
        self()
    }
}
