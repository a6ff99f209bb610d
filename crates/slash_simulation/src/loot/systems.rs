//! Loot systems: soul drops, breakable props, pickup collection.

use bevy::prelude::*;

use crate::combat::{BreakRequest, Dead, PresentationCue};
use crate::components::Attributes;
use crate::loot::{Breakable, LootSpawnRequest, Pickup, PickupKind};
use crate::player::Player;

/// Система: LootSpawnRequest → soul pickup в мире
pub fn spawn_loot(mut commands: Commands, mut requests: EventReader<LootSpawnRequest>) {
    for request in requests.read() {
        if request.souls == 0 {
            continue;
        }
        commands.spawn((
            Pickup::souls(request.souls),
            Transform::from_translation(request.at),
        ));
        crate::log(&format!("✨ Soul pickup x{} spawned at {:?}", request.souls, request.at));
    }
}

/// Система: первый удар ломает prop и роняет сокровище (ровно один раз)
pub fn break_on_hit(
    mut commands: Commands,
    mut requests: EventReader<BreakRequest>,
    mut breakables: Query<(&mut Breakable, &Transform)>,
    mut cues: EventWriter<PresentationCue>,
) {
    for request in requests.read() {
        let Ok((mut breakable, transform)) = breakables.get_mut(request.target) else {
            continue;
        };
        if breakable.broken {
            continue;
        }
        breakable.broken = true;

        cues.write(PresentationCue::HitSound {
            at: request.impact_point,
        });
        if breakable.treasure_gold > 0 {
            commands.spawn((
                Pickup::gold(breakable.treasure_gold),
                Transform::from_translation(transform.translation + breakable.treasure_offset),
            ));
        }

        crate::log(&format!(
            "🏺 {:?} broken by {:?}, treasure {}",
            request.target, request.instigator, breakable.treasure_gold
        ));
    }
}

/// Система: живой игрок рядом с pickup забирает его
pub fn collect_pickups(
    mut commands: Commands,
    pickups: Query<(Entity, &Pickup, &Transform)>,
    mut players: Query<(&Transform, &mut Attributes), (With<Player>, Without<Dead>)>,
    mut cues: EventWriter<PresentationCue>,
) {
    for (pickup_entity, pickup, pickup_transform) in pickups.iter() {
        let collector = players.iter_mut().find(|(transform, attributes)| {
            attributes.is_alive()
                && transform.translation.distance(pickup_transform.translation) <= pickup.radius
        });
        let Some((_, mut attributes)) = collector else {
            continue;
        };

        match pickup.kind {
            PickupKind::Gold(amount) => attributes.add_gold(amount),
            PickupKind::Souls(amount) => attributes.add_souls(amount),
        }
        cues.write(PresentationCue::PickupSound {
            at: pickup_transform.translation,
        });
        commands.entity(pickup_entity).despawn();

        crate::log(&format!("💰 Collected {:?}", pickup.kind));
    }
}
