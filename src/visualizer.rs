//! 2D visualization.
//!
//! The drawables of the episode are drawn as outlines every frame. Arena coordinates grow to the
//! south and have their origin in the north-west corner, the camera looks at the arena center.

use bevy::prelude::*;

use ratbox::domain::{
    DrawableGeometry, Position, Sprite as DrawableSprite, World as Arena, AGENT_SPRITE, COLORS,
    GOAL_CAPTURE_EXTENT,
};

use crate::resource::{EpisodeRes, LastStepRes};

/// Radius of the goal marker.
const GOAL_RADIUS: f32 = 10.0;

pub struct Visualizer;

impl Plugin for Visualizer {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(named_color("forest_green")))
            .init_resource::<Hud>()
            .add_systems(Startup, set_up)
            .add_systems(Update, (draw, update_text, handle_keyboard_input));
    }
}

#[derive(Resource)]
struct Hud {
    show_text: bool,
}

impl Default for Hud {
    fn default() -> Self {
        Self { show_text: true }
    }
}

fn set_up(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
    create_text(&mut commands);
}

fn create_text(commands: &mut Commands) {
    let text_style = TextStyle {
        font_size: 20.0,
        ..default()
    };
    commands.spawn(
        TextBundle::from_sections(vec![TextSection::new("", text_style)]).with_style(
            Style {
                position_type: PositionType::Absolute,
                bottom: Val::Px(12.0),
                left: Val::Px(12.0),
                ..default()
            },
        ),
    );
}

fn draw(mut gizmos: Gizmos, episode: Res<EpisodeRes>) {
    let arena = episode.world();
    gizmos.rect_2d(
        Vec2::ZERO,
        0.0,
        Vec2::new(
            (arena.width() - 2.0 * arena.margin()) as f32,
            (arena.height() - 2.0 * arena.margin()) as f32,
        ),
        named_color("black"),
    );

    for drawable in episode.drawables() {
        let position = to_bevy_position(arena, drawable.position);
        let color = sprite_color(&drawable.sprite);

        match drawable.geometry {
            DrawableGeometry::Rectangle {
                width,
                height,
                rotation,
            } => {
                gizmos.rect_2d(
                    position,
                    rotation.to_radians() as f32,
                    Vec2::new(width as f32, height as f32),
                    color,
                );
            }
            DrawableGeometry::Circle { radius } => {
                gizmos.circle_2d(position, radius as f32, color);
            }
            DrawableGeometry::Point => {
                gizmos.circle_2d(position, GOAL_RADIUS, color);
                gizmos.rect_2d(
                    position,
                    0.0,
                    Vec2::splat(2.0 * GOAL_CAPTURE_EXTENT as f32),
                    color,
                );
            }
        }

        if let Some(heading) = drawable.heading {
            let length = match drawable.geometry {
                DrawableGeometry::Circle { radius } => 1.5 * radius as f32,
                _ => 2.0 * GOAL_RADIUS,
            };
            let direction = Vec2::from_angle(heading.to_radians() as f32);
            gizmos.line_2d(position, position + direction * length, color);
        }
    }
}

fn update_text(
    mut text: Query<&mut Text>,
    hud: Res<Hud>,
    episode: Res<EpisodeRes>,
    last_step: Res<LastStepRes>,
) {
    let mut text = text.single_mut();
    if hud.show_text {
        let reward = last_step.map_or("---".to_string(), |step| format!("{:+.4}", step.reward));
        let collided = last_step.map_or("---", |step| if step.collided { "yes" } else { "no" });
        let agent = episode.agent();
        let step = episode.step_count();
        let heading = agent.heading();
        let steering = agent.steering();
        text.sections[0].value = format!(
            "STEP: {step:3}   REWARD: {reward}   COLLIDED: {collided}   \
             HEADING: {heading:4.0} deg   STEERING: {steering}"
        );
    } else {
        text.sections[0].value = String::new();
    }
}

fn handle_keyboard_input(keys: Res<ButtonInput<KeyCode>>, mut hud: ResMut<Hud>) {
    if keys.just_pressed(KeyCode::KeyT) {
        hud.show_text = !hud.show_text;
    }
}

fn named_color(name: &str) -> Color {
    let [r, g, b] = COLORS.get(name).copied().unwrap_or_default();
    Color::rgb_u8(r, g, b)
}

fn sprite_color(sprite: &DrawableSprite) -> Color {
    match sprite {
        DrawableSprite::Color { rgb: [r, g, b], .. } => Color::rgb_u8(*r, *g, *b),
        DrawableSprite::Image(AGENT_SPRITE) => Color::WHITE,
        DrawableSprite::Image(_) => named_color("yellow"),
    }
}

fn to_bevy_position(arena: &Arena, position: Position) -> Vec2 {
    Vec2::new(
        (position.x() - arena.width() / 2.0) as f32,
        (arena.height() / 2.0 - position.y()) as f32,
    )
}
