use super::traits::ChartSurface;

/// Where the dashboard is running, injected by the host.
///
/// A server-side rendering pass never draws. A rendering host may still
/// lack a surface until its view is laid out; it can attach one later.
pub struct RenderEnvironment {
    renders: bool,
    surface: Option<Box<dyn ChartSurface>>,
}

impl RenderEnvironment {
    /// Interactive host with a surface ready to draw on.
    pub fn browser(surface: Box<dyn ChartSurface>) -> Self {
        Self {
            renders: true,
            surface: Some(surface),
        }
    }

    /// Interactive host whose surface does not exist yet.
    pub fn browser_pending() -> Self {
        Self {
            renders: true,
            surface: None,
        }
    }

    /// Non-rendering pass. Chart operations are always skipped.
    pub fn server() -> Self {
        Self {
            renders: false,
            surface: None,
        }
    }

    pub fn attach_surface(&mut self, surface: Box<dyn ChartSurface>) {
        self.surface = Some(surface);
    }

    #[must_use]
    pub fn is_rendering(&self) -> bool {
        self.renders
    }

    /// Rendering host with a surface attached.
    #[must_use]
    pub fn can_draw(&self) -> bool {
        self.renders && self.surface.is_some()
    }

    /// The surface, only if this environment draws at all.
    pub fn surface_mut(&mut self) -> Option<&mut (dyn ChartSurface + 'static)> {
        if !self.renders {
            return None;
        }
        self.surface.as_deref_mut()
    }
}

impl std::fmt::Debug for RenderEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderEnvironment")
            .field("renders", &self.renders)
            .field("surface", &self.surface.is_some())
            .finish()
    }
}
