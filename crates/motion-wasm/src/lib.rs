use glam::Vec2;
use motion_core::component::{
    GridTimeline, HeroMotion, HoverPreview, ParticleBackground, PinnedReveal, RevealGroup,
};
use motion_core::config::MotionConfig;
use motion_core::error::{MotionError, Result};
use motion_core::field::ParticleField;
use motion_core::reveal::RevealAnimation;
use motion_core::scroll::ScrollController;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub mod host;
pub mod surface;

use host::Runtime;
use surface::CanvasSurface;

/// Packed particle for JS-side renderers: 24 bytes.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct ParticleVertex {
    position: [f32; 2], //  8 bytes
    velocity: [f32; 2], //  8 bytes
    size: f32,          //  4 bytes
    opacity: f32,       //  4 bytes
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("motion engine loaded");
}

fn parse_config(json: Option<String>) -> Result<MotionConfig> {
    match json {
        Some(json) => MotionConfig::from_json(&json),
        None => Ok(MotionConfig::default()),
    }
}

fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| MotionError::MissingSurface("window".into()))
}

fn document(window: &web_sys::Window) -> Result<web_sys::Document> {
    window
        .document()
        .ok_or_else(|| MotionError::MissingSurface("document".into()))
}

fn query_all(document: &web_sys::Document, selector: &str) -> Result<Vec<web_sys::Element>> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(|_| MotionError::InvalidConfig(format!("bad selector `{selector}`")))?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|n| n.dyn_into::<web_sys::Element>().ok())
        .collect())
}

fn prefers_reduced_motion(window: &web_sys::Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Particle backdrop
// ---------------------------------------------------------------------------

#[wasm_bindgen]
pub struct ParticleBackdrop {
    runtime: Runtime<ParticleBackground<CanvasSurface>>,
    snapshot: Vec<ParticleVertex>,
}

#[wasm_bindgen]
impl ParticleBackdrop {
    /// Mount on `<canvas id=canvas_id>`. Returns `undefined` when the canvas
    /// or its 2D context is missing; the rest of the page is unaffected.
    #[wasm_bindgen]
    pub fn mount(canvas_id: &str, config_json: Option<String>) -> Option<ParticleBackdrop> {
        match Self::try_mount(canvas_id, config_json) {
            Ok(backdrop) => Some(backdrop),
            Err(err) => {
                log::warn!("particle backdrop disabled: {}", err);
                None
            }
        }
    }

    #[wasm_bindgen]
    pub fn unmount(&self) {
        self.runtime.unmount();
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.runtime.with(|c| c.field.particles.count)
    }

    #[wasm_bindgen]
    pub fn frames(&self) -> f64 {
        self.runtime.with(|c| c.frames() as f64)
    }

    /// Copy current particle state into the snapshot buffer and return its
    /// address in wasm memory.
    #[wasm_bindgen]
    pub fn snapshot_ptr(&mut self) -> *const f32 {
        let snapshot = &mut self.snapshot;
        self.runtime.with(|c| {
            let p = &c.field.particles;
            snapshot.clear();
            snapshot.extend((0..p.count).map(|i| ParticleVertex {
                position: p.position[i].to_array(),
                velocity: p.velocity[i].to_array(),
                size: p.size[i],
                opacity: p.opacity[i],
            }));
        });
        self.snapshot.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn snapshot_byte_length(&self) -> usize {
        bytemuck::cast_slice::<ParticleVertex, u8>(&self.snapshot).len()
    }
}

impl ParticleBackdrop {
    fn try_mount(canvas_id: &str, config_json: Option<String>) -> Result<ParticleBackdrop> {
        let config = parse_config(config_json)?;
        let window = window()?;
        let surface = CanvasSurface::by_id(&document(&window)?, canvas_id)?;
        let canvas: web_sys::Element = surface.canvas().clone().unchecked_into();

        let runtime = Runtime::new(window, move |host| {
            let id = host.register(canvas);
            let field = ParticleField::new(config.field, 0.0, 0.0);
            ParticleBackground::new(field, surface, id)
        });
        runtime.mount();

        let count = runtime.with(|c| c.field.particles.count);
        log::info!("particle backdrop mounted: {} particles", count);

        Ok(ParticleBackdrop {
            runtime,
            snapshot: Vec::new(),
        })
    }
}

// ---------------------------------------------------------------------------
// Pinned showreel reveal
// ---------------------------------------------------------------------------

#[wasm_bindgen]
pub struct ShowreelReveal {
    runtime: Runtime<PinnedReveal>,
}

#[wasm_bindgen]
impl ShowreelReveal {
    /// Track the section `section_id`, which should be two viewports tall.
    #[wasm_bindgen]
    pub fn mount(section_id: &str, config_json: Option<String>) -> Option<ShowreelReveal> {
        let mounted = (|| -> Result<ShowreelReveal> {
            let config = parse_config(config_json)?;
            let window = window()?;
            let section = document(&window)?
                .get_element_by_id(section_id)
                .ok_or_else(|| MotionError::MissingSurface(section_id.to_string()))?;

            let runtime = Runtime::new(window, move |host| {
                let id = host.register(section);
                PinnedReveal::new(ScrollController::new(config.scroll), id)
            });
            runtime.mount();
            Ok(ShowreelReveal { runtime })
        })();

        mounted
            .map_err(|err| log::warn!("showreel reveal disabled: {}", err))
            .ok()
    }

    #[wasm_bindgen]
    pub fn unmount(&self) {
        self.runtime.unmount();
    }

    #[wasm_bindgen]
    pub fn phase(&self) -> f32 {
        self.runtime.with(|c| c.phase())
    }

    /// Whether the video should stay `position: fixed`.
    #[wasm_bindgen]
    pub fn pinned(&self) -> bool {
        self.runtime.with(|c| c.pinned())
    }

    #[wasm_bindgen]
    pub fn text_translate_y(&self) -> f32 {
        self.runtime.with(|c| c.outputs().text_translate_y)
    }

    #[wasm_bindgen]
    pub fn text_opacity(&self) -> f32 {
        self.runtime.with(|c| c.outputs().text_opacity)
    }

    #[wasm_bindgen]
    pub fn overlay_opacity(&self) -> f32 {
        self.runtime.with(|c| c.outputs().overlay_opacity)
    }

    #[wasm_bindgen]
    pub fn overlay_blur(&self) -> f32 {
        self.runtime.with(|c| c.outputs().overlay_blur)
    }
}

// ---------------------------------------------------------------------------
// One-shot reveals
// ---------------------------------------------------------------------------

#[wasm_bindgen]
pub struct RevealWatcher {
    runtime: Runtime<RevealGroup>,
}

#[wasm_bindgen]
impl RevealWatcher {
    /// Observe every element matching `selector`. The animation comes from
    /// the element's reveal class, the delay from `data-reveal-delay` (ms).
    #[wasm_bindgen]
    pub fn mount(selector: &str, config_json: Option<String>) -> Option<RevealWatcher> {
        let mounted = (|| -> Result<RevealWatcher> {
            let mut config = parse_config(config_json)?;
            let window = window()?;
            config.reveal.reduced_motion |= prefers_reduced_motion(&window);
            let elements = query_all(&document(&window)?, selector)?;

            let runtime = Runtime::new(window, move |host| {
                let mut group = RevealGroup::new(config.reveal);
                for el in elements {
                    let class_list = el.class_list();
                    let animation = RevealAnimation::ALL
                        .into_iter()
                        .find(|a| class_list.contains(a.class()))
                        .unwrap_or_default();
                    let delay = el
                        .get_attribute("data-reveal-delay")
                        .and_then(|d| d.parse::<u32>().ok())
                        .unwrap_or(0);
                    group.push(host.register(el), animation, delay);
                }
                group
            });
            runtime.mount();
            Ok(RevealWatcher { runtime })
        })();

        mounted
            .map_err(|err| log::warn!("reveal watcher disabled: {}", err))
            .ok()
    }

    #[wasm_bindgen]
    pub fn unmount(&self) {
        self.runtime.unmount();
    }

    #[wasm_bindgen]
    pub fn revealed_count(&self) -> usize {
        self.runtime.with(|c| c.revealed_count())
    }
}

// ---------------------------------------------------------------------------
// Hero parallax
// ---------------------------------------------------------------------------

#[wasm_bindgen]
pub struct HeroParallax {
    runtime: Runtime<HeroMotion>,
}

#[wasm_bindgen]
impl HeroParallax {
    #[wasm_bindgen]
    pub fn mount() -> Option<HeroParallax> {
        let window = web_sys::window()?;
        let runtime = Runtime::new(window, |_| HeroMotion::new());
        runtime.mount();
        Some(HeroParallax { runtime })
    }

    #[wasm_bindgen]
    pub fn unmount(&self) {
        self.runtime.unmount();
    }

    #[wasm_bindgen]
    pub fn background_y(&self) -> f32 {
        self.runtime.with(|c| c.outputs().background_y)
    }

    /// `[x0, y0, x1, y1, x2, y2]` offsets of the three accent layers.
    #[wasm_bindgen]
    pub fn layer_offsets(&self) -> Vec<f32> {
        self.runtime
            .with(|c| c.outputs().layers.iter().flat_map(|v| v.to_array()).collect())
    }

    #[wasm_bindgen]
    pub fn header_scrolled(&self) -> bool {
        self.runtime.with(|c| c.outputs().header_scrolled)
    }
}

// ---------------------------------------------------------------------------
// Services hover preview
// ---------------------------------------------------------------------------

#[wasm_bindgen]
pub struct ServicesHover {
    runtime: Runtime<HoverPreview>,
}

#[wasm_bindgen]
impl ServicesHover {
    /// Track the rows matching `row_selector`, in document order.
    #[wasm_bindgen]
    pub fn mount(row_selector: &str) -> Option<ServicesHover> {
        let mounted = (|| -> Result<ServicesHover> {
            let window = window()?;
            let rows = query_all(&document(&window)?, row_selector)?;
            let runtime = Runtime::new(window, move |host| {
                HoverPreview::new(rows.into_iter().map(|el| host.register(el)).collect())
            });
            runtime.mount();
            Ok(ServicesHover { runtime })
        })();

        mounted
            .map_err(|err| log::warn!("services hover disabled: {}", err))
            .ok()
    }

    #[wasm_bindgen]
    pub fn unmount(&self) {
        self.runtime.unmount();
    }

    #[wasm_bindgen]
    pub fn x(&self) -> f32 {
        self.runtime.with(|c| c.position().x)
    }

    #[wasm_bindgen]
    pub fn y(&self) -> f32 {
        self.runtime.with(|c| c.position().y)
    }

    /// Index of the row whose right half is under the cursor, or -1.
    #[wasm_bindgen]
    pub fn hovered(&self) -> i32 {
        self.runtime
            .with(|c| c.hovered().map(|i| i as i32).unwrap_or(-1))
    }

    #[wasm_bindgen]
    pub fn animating(&self) -> bool {
        self.runtime.with(|c| c.animating())
    }
}

// ---------------------------------------------------------------------------
// Image grid timeline
// ---------------------------------------------------------------------------

#[wasm_bindgen]
pub struct ImageGrid {
    runtime: Runtime<GridTimeline>,
}

#[wasm_bindgen]
impl ImageGrid {
    /// Scrub the grid in `section_id`. The center image ends at
    /// `natural_width` x `natural_height`.
    #[wasm_bindgen]
    pub fn mount(
        section_id: &str,
        natural_width: f32,
        natural_height: f32,
        layer_count: usize,
    ) -> Option<ImageGrid> {
        let mounted = (|| -> Result<ImageGrid> {
            let window = window()?;
            let section = document(&window)?
                .get_element_by_id(section_id)
                .ok_or_else(|| MotionError::MissingSurface(section_id.to_string()))?;
            let natural = Vec2::new(natural_width, natural_height);

            let runtime = Runtime::new(window, move |host| {
                GridTimeline::new(host.register(section), natural, layer_count)
            });
            runtime.mount();
            Ok(ImageGrid { runtime })
        })();

        mounted
            .map_err(|err| log::warn!("image grid disabled: {}", err))
            .ok()
    }

    #[wasm_bindgen]
    pub fn unmount(&self) {
        self.runtime.unmount();
    }

    #[wasm_bindgen]
    pub fn scaler_width(&self) -> f32 {
        self.runtime.with(|c| c.outputs().scaler_size.x)
    }

    #[wasm_bindgen]
    pub fn scaler_height(&self) -> f32 {
        self.runtime.with(|c| c.outputs().scaler_size.y)
    }

    #[wasm_bindgen]
    pub fn scaler_progress(&self) -> f32 {
        self.runtime.with(|c| c.outputs().scaler_progress)
    }

    #[wasm_bindgen]
    pub fn layer_progress(&self) -> f32 {
        self.runtime.with(|c| c.outputs().layer_progress)
    }

    #[wasm_bindgen]
    pub fn layer_opacities(&self) -> Vec<f32> {
        self.runtime
            .with(|c| c.outputs().layers.iter().map(|l| l.opacity).collect())
    }

    #[wasm_bindgen]
    pub fn layer_scales(&self) -> Vec<f32> {
        self.runtime
            .with(|c| c.outputs().layers.iter().map(|l| l.scale).collect())
    }
}
