//! Hero section
//!
//! Plays its entrance right away on mount, runs the ambient particle field
//! every frame and tilts the portrait toward the pointer.

use std::sync::{Arc, Mutex, PoisonError};

use folio_animation::AnimationPreset;
use folio_core::{Event, EventType, FrameControl, Geometry, RecordingContext, Result};
use folio_particles::ParticleField;
use folio_scroll::SectionAnchor;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use super::{track_root, Section};
use crate::document::lock;
use crate::lifecycle::MountContext;
use crate::tilt::Tilt;

/// Canvas the particle field paints into
pub type SharedCanvas = Arc<Mutex<RecordingContext>>;

#[derive(Debug)]
pub struct HeroSection {
    canvas: SharedCanvas,
}

impl HeroSection {
    pub fn new(canvas: SharedCanvas) -> Self {
        Self { canvas }
    }
}

impl Section for HeroSection {
    fn anchor(&self) -> SectionAnchor {
        SectionAnchor::Home
    }

    fn mount(&mut self, ctx: &mut MountContext<'_>) -> Result<()> {
        track_root(ctx, SectionAnchor::Home)?;

        let entrances = [
            ("hero.title", AnimationPreset::hero_title()),
            ("hero.subtitle", AnimationPreset::hero_subtitle()),
            ("hero.portrait", AnimationPreset::hero_portrait()),
        ];
        for (key, preset) in entrances {
            if let Some(target) = ctx.target(key) {
                ctx.play(target, preset.animation);
            }
        }

        let config = ctx.config();
        let rng = match config.hero.particle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let viewport = ctx.snapshot().scroll.viewport;
        let field = Arc::new(Mutex::new(ParticleField::new(
            config.particles.clone(),
            viewport,
            rng,
        )));
        let portrait_tilt = config.hero.portrait_tilt;
        debug!("HeroSection: particle field sized {}x{}", viewport.width, viewport.height);

        ctx.listen(EventType::Resize, {
            let field = Arc::clone(&field);
            move |event| {
                if let Event::Resize { size } = *event {
                    field
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .resize(size);
                }
            }
        });

        let mut tilt = match ctx.target("hero.portrait") {
            Some(portrait) if portrait_tilt => {
                ctx.own(portrait);
                Some(Tilt::portrait(portrait))
            }
            _ => None,
        };
        let canvas = Arc::clone(&self.canvas);
        let document = ctx.document();
        let scheduler = ctx.scheduler();
        ctx.request_frame(move |info| {
            {
                let mut field = field.lock().unwrap_or_else(PoisonError::into_inner);
                let mut canvas = canvas.lock().unwrap_or_else(PoisonError::into_inner);
                field.frame(info.snapshot.pointer, &mut *canvas);
            }
            if let Some(tilt) = tilt.as_mut() {
                let rect = lock(&document).measure(tilt.target());
                tilt.update(rect, info.snapshot.pointer_in_document(), &scheduler);
            }
            FrameControl::Continue
        });

        Ok(())
    }
}
