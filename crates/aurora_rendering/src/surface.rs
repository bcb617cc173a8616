//! The rendering seam.
//!
//! The engine only ever measures a surface and pushes element states into
//! handles it created from that surface. It never assumes anything about
//! sibling content.

use aurora_shared::{ParticleKind, SurfaceSize, Vec2};

/// Everything a renderer needs to draw one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementState {
    /// Center, surface coordinates
    pub position: Vec2,
    /// Diameter in pixels
    pub size: f32,
    /// Effective opacity after fades, `[0, 1]`
    pub opacity: f32,
    /// RGBA color
    pub color: [f32; 4],
    /// Particle type, for styling
    pub kind: ParticleKind,
}

/// One reusable visual handle (a DOM node, a sprite, a terminal cell).
pub trait VisualElement {
    /// Shows the element with `state`.
    fn apply(&mut self, state: &ElementState);

    /// Hides the element; it stays attached for reuse.
    fn hide(&mut self);

    /// Removes the element from the surface for good.
    fn detach(&mut self);
}

/// The container the engine draws on.
pub trait RenderSurface {
    /// Element handle type this surface hands out.
    type Element: VisualElement;

    /// Current size, or `None` if the surface is missing or not laid out.
    fn measure(&self) -> Option<SurfaceSize>;

    /// Creates (attaches) a hidden element. Called once per pool slot.
    fn create_element(&mut self, index: usize) -> Self::Element;
}

/// Element of a [`HeadlessSurface`]: remembers what it was told.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessElement {
    /// Slot index this element was created for.
    pub index: usize,
    /// Last applied state.
    pub state: Option<ElementState>,
    /// Shown or hidden.
    pub visible: bool,
    /// Still part of the surface.
    pub attached: bool,
    /// Number of `apply` calls.
    pub updates: u64,
}

impl VisualElement for HeadlessElement {
    fn apply(&mut self, state: &ElementState) {
        self.state = Some(*state);
        self.visible = true;
        self.updates += 1;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn detach(&mut self) {
        self.visible = false;
        self.attached = false;
    }
}

/// A surface with no pixels, for tests, benchmarks and the demo binary.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    size: Option<SurfaceSize>,
    elements_created: usize,
}

impl HeadlessSurface {
    /// A laid-out surface of the given size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            size: Some(SurfaceSize::new(width, height)),
            elements_created: 0,
        }
    }

    /// A surface that is not in the page.
    #[must_use]
    pub const fn missing() -> Self {
        Self {
            size: None,
            elements_created: 0,
        }
    }

    /// Total elements ever created on this surface.
    #[must_use]
    pub const fn elements_created(&self) -> usize {
        self.elements_created
    }
}

impl RenderSurface for HeadlessSurface {
    type Element = HeadlessElement;

    fn measure(&self) -> Option<SurfaceSize> {
        self.size
    }

    fn create_element(&mut self, index: usize) -> HeadlessElement {
        self.elements_created += 1;
        HeadlessElement {
            index,
            attached: true,
            ..HeadlessElement::default()
        }
    }
}
