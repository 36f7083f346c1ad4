use std::sync::Arc;

use super::effects::{Aurora, MatrixRain, Particles, Sphere, Tunnel, Warp};
use super::render_loop::FrameRequester;
use super::{AnimationInstance, AnimationKind, CreateContext};
use crate::schema::{Schema, SchemaResult};

/// Static catalog entry of one animation module
#[derive(Debug)]
pub struct ModuleDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    /// Standalone web source of the effect, used by the exporter
    pub source: &'static str,
    schema: fn() -> Schema,
    construct: fn(&CreateContext, &mut Schema) -> AnimationKind,
}

impl ModuleDescriptor {
    pub const fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        tags: &'static [&'static str],
        source: &'static str,
        schema: fn() -> Schema,
        construct: fn(&CreateContext, &mut Schema) -> AnimationKind,
    ) -> Self {
        Self {
            id,
            name,
            description,
            tags,
            source,
            schema,
            construct,
        }
    }

    /// Builds a fresh default schema for this module and checks it
    pub fn load_schema(&self) -> SchemaResult<Schema> {
        let schema = (self.schema)();
        schema.validate()?;
        Ok(schema)
    }

    /// Constructs an independent instance over `schema`
    pub fn create(
        &self,
        mut schema: Schema,
        ctx: &CreateContext,
        requester: Arc<dyn FrameRequester>,
    ) -> AnimationInstance {
        let animation = (self.construct)(ctx, &mut schema);
        AnimationInstance::new(self.id, animation, schema, ctx, requester)
    }
}

pub static CATALOG: &[ModuleDescriptor] = &[
    ModuleDescriptor {
        id: "particles",
        name: "Interactive Particles",
        description: "A network of dots that links up around the cursor.",
        tags: &["Particles", "Interactive"],
        source: include_str!("../../assets/effects/particles.js"),
        schema: Particles::schema,
        construct: |ctx, config| AnimationKind::Particles(Particles::new(ctx, config)),
    },
    ModuleDescriptor {
        id: "matrix_rain",
        name: "Matrix Rain",
        description: "The classic falling digital code.",
        tags: &["Retro", "Cyber"],
        source: include_str!("../../assets/effects/matrix_rain.js"),
        schema: MatrixRain::schema,
        construct: |ctx, config| AnimationKind::MatrixRain(MatrixRain::new(ctx, config)),
    },
    ModuleDescriptor {
        id: "tunnel",
        name: "Infinite Tunnel",
        description: "A hypnotic 3D tunnel rushing towards the screen.",
        tags: &["3D", "Geometric"],
        source: include_str!("../../assets/effects/tunnel.js"),
        schema: Tunnel::schema,
        construct: |ctx, config| AnimationKind::Tunnel(Tunnel::new(ctx, config)),
    },
    ModuleDescriptor {
        id: "aurora",
        name: "Aurora",
        description: "Soft flowing color layers reminiscent of the northern lights.",
        tags: &["Gradient", "Smooth"],
        source: include_str!("../../assets/effects/aurora.js"),
        schema: Aurora::schema,
        construct: |ctx, config| AnimationKind::Aurora(Aurora::new(ctx, config)),
    },
    ModuleDescriptor {
        id: "warp",
        name: "Warp Speed",
        description: "Travelling between the stars at high speed.",
        tags: &["Space", "Interactive"],
        source: include_str!("../../assets/effects/warp.js"),
        schema: Warp::schema,
        construct: |ctx, config| AnimationKind::Warp(Warp::new(ctx, config)),
    },
    ModuleDescriptor {
        id: "sphere",
        name: "Wireframe Sphere",
        description: "A rotating 3D globe made of latitude and longitude lines.",
        tags: &["3D", "Wireframe"],
        source: include_str!("../../assets/effects/sphere.js"),
        schema: Sphere::schema,
        construct: |ctx, config| AnimationKind::Sphere(Sphere::new(ctx, config)),
    },
];

/// Looks up a catalog entry by id
pub fn find(id: &str) -> Option<&'static ModuleDescriptor> {
    CATALOG.iter().find(|descriptor| descriptor.id == id)
}

/// The entry shown when nothing else was requested
pub fn first() -> &'static ModuleDescriptor {
    &CATALOG[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::NoFrames;
    use crate::theme::Theme;
    use eframe::egui::vec2;

    #[test]
    fn test_catalog_ids_are_unique() {
        for (index, descriptor) in CATALOG.iter().enumerate() {
            assert!(
                CATALOG[..index].iter().all(|other| other.id != descriptor.id),
                "duplicate id {}",
                descriptor.id
            );
        }
    }

    #[test]
    fn test_every_schema_is_valid() {
        for descriptor in CATALOG {
            let schema = descriptor.load_schema();
            assert!(schema.is_ok(), "{}: {:?}", descriptor.id, schema);
        }
    }

    #[test]
    fn test_every_source_exposes_the_standalone_contract() {
        for descriptor in CATALOG {
            assert!(
                descriptor.source.contains("export function init(canvas, isDark)"),
                "{} has no init",
                descriptor.id
            );
            assert!(descriptor.source.contains("export const config"), "{}", descriptor.id);
        }
    }

    #[test]
    fn test_instances_are_independent() {
        let descriptor = find("particles").unwrap();
        let ctx = CreateContext {
            size: vec2(300.0, 200.0),
            theme: Theme::Dark,
            seed: 1,
        };
        let mut a = descriptor.create(descriptor.load_schema().unwrap(), &ctx, Arc::new(NoFrames));
        let b = descriptor.create(descriptor.load_schema().unwrap(), &ctx, Arc::new(NoFrames));

        a.update_config("count", 150.0.into()).unwrap();
        assert_eq!(a.schema().number("count"), Some(150.0));
        assert_eq!(b.schema().number("count"), Some(80.0));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_find() {
        assert_eq!(find("tunnel").map(|d| d.name), Some("Infinite Tunnel"));
        assert!(find("nonexistent").is_none());
        assert_eq!(first().id, "particles");
    }
}
