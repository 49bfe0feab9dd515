use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::character::{Character, MotionState};
use crate::components::clip::{AnimClip, ClipPlayer};
use crate::components::stageposition::StagePosition;
use crate::components::yaw::Yaw;
use crate::game::{MODEL_CHARACTER, MODEL_STAGE, TEX_BACKGROUND};
use crate::resources::camera::CameraRes;
use crate::resources::debugmode::DebugMode;
use crate::resources::modelstore::ModelStore;
use crate::resources::scene::SceneManifest;
use crate::resources::texturestore::TextureStore;
use crate::resources::windowsize::WindowSize;

/// Copy of the per-entity data the draw scopes need, collected up front so
/// world borrows end before the non-send stores come out.
struct CharacterDraw {
    pos: Vector3,
    yaw: f32,
    state: MotionState,
    clip: AnimClip,
    frame: i32,
}

/// Exclusive render system.
///
/// Takes the Raylib handle and thread out of the world, advances the model
/// animation pose for each character, draws the background, the 3D pass and
/// the debug overlay, then puts the handles back. Running without a window
/// (no Raylib resources in the world) is a no-op so the schedule stays usable
/// in headless tests.
pub fn render_system(world: &mut World) {
    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        return;
    };
    let Some(thread) = world.remove_non_send_resource::<RaylibThread>() else {
        world.insert_non_send_resource(rl);
        return;
    };

    // Collect per-entity draw data before touching the asset stores.
    let characters: Vec<CharacterDraw> = {
        let mut q = world.query::<(&StagePosition, &Yaw, &Character, &ClipPlayer)>();
        q.iter(world)
            .map(|(p, y, ch, player)| CharacterDraw {
                pos: p.pos,
                yaw: y.degrees,
                state: ch.state,
                clip: player.clip,
                frame: player.frame,
            })
            .collect()
    };

    let camera = world.get_resource::<CameraRes>().map(|c| c.0);
    let size = *world.resource::<WindowSize>();
    let debug = world.contains_resource::<DebugMode>();
    let (stage_pos, stage_scale, character_scale) = world
        .get_resource::<SceneManifest>()
        .map(|m| (m.stage_position(), m.stage.scale, m.character.scale))
        .unwrap_or((Vector3::zero(), 1.0, 1.0));

    let mut models = world.remove_non_send_resource::<ModelStore>();
    let textures = world.remove_non_send_resource::<TextureStore>();

    // Pose the skinned mesh for the active clip frame. Must happen outside
    // the drawing scope, `update_model_animation` needs the bare handle.
    if let Some(store) = models.as_mut() {
        for c in characters.iter() {
            if let Some((model, anim)) = store.model_and_clip(MODEL_CHARACTER, c.clip.key()) {
                rl.update_model_animation(&thread, model, anim, c.frame);
            }
        }
    }

    {
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);

        // Backdrop stretched to the window, drawn before the 3D pass.
        if let Some(tex) = textures.as_ref().and_then(|t| t.get(TEX_BACKGROUND)) {
            let src = Rectangle {
                x: 0.0,
                y: 0.0,
                width: tex.width as f32,
                height: tex.height as f32,
            };
            let dest = Rectangle {
                x: 0.0,
                y: 0.0,
                width: size.w as f32,
                height: size.h as f32,
            };
            d.draw_texture_pro(tex, src, dest, Vector2::zero(), 0.0, Color::WHITE);
        }

        if let (Some(camera), Some(store)) = (camera, models.as_ref()) {
            let mut d3 = d.begin_mode3D(camera);

            if let Some(model) = store.model(MODEL_STAGE) {
                d3.draw_model_ex(
                    model,
                    stage_pos,
                    Vector3::up(),
                    0.0,
                    Vector3::one() * stage_scale,
                    Color::WHITE,
                );
            }

            if let Some(model) = store.model(MODEL_CHARACTER) {
                for c in characters.iter() {
                    d3.draw_model_ex(
                        model,
                        c.pos,
                        Vector3::up(),
                        c.yaw,
                        Vector3::one() * character_scale,
                        Color::WHITE,
                    );
                }
            }
        }

        if debug {
            d.draw_fps(8, 8);
            for (i, c) in characters.iter().enumerate() {
                let line = format!(
                    "{:?} pos ({:.2}, {:.2}, {:.2}) yaw {:.1}",
                    c.state, c.pos.x, c.pos.y, c.pos.z, c.yaw
                );
                d.draw_text(&line, 8, 32 + 20 * i as i32, 20, Color::LIME);
            }
        }
    }

    if let Some(store) = models {
        world.insert_non_send_resource(store);
    }
    if let Some(store) = textures {
        world.insert_non_send_resource(store);
    }
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);
}
