//! One-shot deferred actions with cancellation.
//!
//! Each scheduled action is its own entity carrying a [`ScheduledTask`].
//! [`tick_scheduled_tasks`] advances the timers and emits a
//! [`DeferredActionFired`] message when one finishes; the handlers for the
//! individual actions read those messages.  Dropping a task before it fires
//! is a matter of despawning its entity through [`TaskHandle::cancel`].

use bevy::prelude::*;

/// Actions that can be deferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferredAction {
    DispenseBall,
}

/// Pending action and the timer gating it.
#[derive(Component, Debug)]
pub struct ScheduledTask {
    pub timer: Timer,
    pub action: DeferredAction,
}

/// Emitted once per task, on the frame its timer finishes.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredActionFired {
    pub action: DeferredAction,
}

/// Cancellation handle returned by [`schedule_task`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle(Entity);

impl TaskHandle {
    #[inline]
    pub fn entity(self) -> Entity {
        self.0
    }

    /// Drop the task if it has not fired yet.  Cancelling a task that already
    /// fired is a no-op.
    pub fn cancel(self, commands: &mut Commands) {
        commands.entity(self.0).try_despawn();
    }
}

/// Run `action` after `delay_secs` of game time.
pub fn schedule_task(commands: &mut Commands, delay_secs: f32, action: DeferredAction) -> TaskHandle {
    let entity = commands
        .spawn((
            Name::new(format!("{action:?} task")),
            ScheduledTask {
                timer: Timer::from_seconds(delay_secs.max(0.0), TimerMode::Once),
                action,
            },
        ))
        .id();
    debug!("Scheduled {:?} in {:.2}s", action, delay_secs);
    TaskHandle(entity)
}

/// Advance every pending task and fire the ones whose timer finished.
pub fn tick_scheduled_tasks(
    mut commands: Commands,
    time: Res<Time>,
    mut tasks: Query<(Entity, &mut ScheduledTask)>,
    mut fired: MessageWriter<DeferredActionFired>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        task.timer.tick(time.delta());
        if task.timer.just_finished() {
            fired.write(DeferredActionFired {
                action: task.action,
            });
            commands.entity(entity).despawn();
        }
    }
}
