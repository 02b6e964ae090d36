//! World Module
//!
//! [`World`] is the host side of the animators: it owns the scene, the event
//! bus, the timer queue and the clock, and drives every controller once per
//! frame.
//!
//! # Frame Order
//!
//! Each call to [`World::update`]:
//!
//! 1. drains the bus and routes deliveries into controller actions,
//! 2. fires due timers (transition-delayed dispatches, delayed starts),
//! 3. steps every animator once.
//!
//! Everything runs on the caller's thread; nothing happens between ticks.
//!
//! # Example
//!
//! ```rust,ignore
//! use transform_animator::{World, config::ControllerConfig};
//!
//! let mut world = World::new();
//! world.scene_mut().add_node(Node::new("door"));
//! let door = world.spawn_controller(ControllerConfig::from_json(json)?)?;
//!
//! world.emit("door-open", serde_json::json!({ "rotationY": 90 }));
//! loop {
//!     world.update();
//! }
//! ```

use serde_json::{Map, Value, json};
use slotmap::SlotMap;

use crate::animation::{Action, ActionPayload};
use crate::config::{ControllerConfig, NetworkRole};
use crate::controller::{Controller, ControllerAnimator, ControllerHandle};
use crate::errors::{AnimatorError, Result};
use crate::events::{Delivery, EventBus, SERVER_TO_CLIENT_CHANNEL, parse_receivers};
use crate::scene::Scene;
use crate::utils::{Clock, SystemClock, TimerQueue};

/// Work parked in the timer queue.
#[derive(Debug, Clone)]
enum Deferred {
    /// An action held back by the transition delay. `received_ms` is when it
    /// arrived, so the inner start delay is measured from there. A stop,
    /// reset or newer start bumps the animator past `generation` and the
    /// held action is dropped.
    Dispatch {
        controller: ControllerHandle,
        action: Action,
        received_ms: f64,
        generation: u64,
    },
    /// A delayed start coming due.
    BeginTargeting {
        controller: ControllerHandle,
        generation: u64,
    },
}

impl Deferred {
    fn controller(&self) -> ControllerHandle {
        match self {
            Deferred::Dispatch { controller, .. } | Deferred::BeginTargeting { controller, .. } => {
                *controller
            }
        }
    }
}

pub struct World {
    scene: Scene,
    bus: EventBus<ControllerHandle>,
    timers: TimerQueue<Deferred>,
    clock: Box<dyn Clock>,
    controllers: SlotMap<ControllerHandle, Controller>,

    frame_count: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates a world driven by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    #[must_use]
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            scene: Scene::new(),
            bus: EventBus::new(),
            timers: TimerQueue::new(),
            clock: Box::new(clock),
            controllers: SlotMap::with_key(),
            frame_count: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    #[inline]
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Number of timers still waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    // ========================================================================
    // Controllers
    // ========================================================================

    /// Resolves the controller's nodes, builds its animator and registers its
    /// bus subscriptions.
    ///
    /// A missing visual node fails the spawn. A missing proxy only disables
    /// proxy stepping.
    pub fn spawn_controller(&mut self, config: ControllerConfig) -> Result<ControllerHandle> {
        let Some(node) = self.scene.find_by_name(&config.node_name) else {
            log::error!(
                "Controller '{}' failed to initialize: node '{}' not found",
                config.id,
                config.node_name
            );
            return Err(AnimatorError::NodeNotFound(config.node_name));
        };

        let proxy = config.active_proxy_name().and_then(|name| {
            let proxy = self.scene.find_by_name(name);
            if proxy.is_none() {
                log::warn!(
                    "Controller '{}': physics proxy '{name}' not found, running without it",
                    config.id
                );
            }
            proxy
        });

        let animator = ControllerAnimator::build(&config, &self.scene, node, proxy);
        let receivers = parse_receivers(&config.receivers);
        let controller = Controller::new(config, animator, receivers);

        let handle = self.controllers.insert(controller);
        let controller = &self.controllers[handle];
        for channel in controller.channels() {
            self.bus.subscribe(channel, handle);
        }
        if controller.config.broadcast_any {
            self.bus.subscribe(&controller.config.id, handle);
            if controller.config.role == NetworkRole::Client {
                self.bus.subscribe(SERVER_TO_CLIENT_CHANNEL, handle);
            }
        }

        log::info!(
            "Spawned {} controller '{}' ({} receiver actions, proxy: {})",
            controller.animator.kind(),
            controller.config.id,
            controller.receivers.len(),
            proxy.is_some()
        );
        Ok(handle)
    }

    /// Removes a controller, its subscriptions and its pending timers.
    pub fn despawn_controller(&mut self, handle: ControllerHandle) -> Option<Controller> {
        let controller = self.controllers.remove(handle)?;
        self.bus.unsubscribe_all(handle);
        self.timers.cancel_where(|task| task.controller() == handle);
        Some(controller)
    }

    #[must_use]
    pub fn controller(&self, handle: ControllerHandle) -> Option<&Controller> {
        self.controllers.get(handle)
    }

    pub fn controllers(&self) -> impl Iterator<Item = (ControllerHandle, &Controller)> {
        self.controllers.iter()
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Publishes `payload` on `channel` as-is.
    pub fn publish(&mut self, channel: &str, payload: Value) {
        self.bus.publish(channel, payload);
    }

    /// Publishes `payload` stamped with the current time, as a remote
    /// emitter would.
    pub fn emit(&mut self, channel: &str, payload: Value) {
        let now = self.clock.now_ms();
        self.bus.emit_stamped(channel, payload, now);
    }

    /// Runs a named action on a controller right away, bypassing the bus.
    /// The transition delay gate still applies.
    pub fn dispatch(&mut self, handle: ControllerHandle, action: &str, data: &Value) -> Result<()> {
        if !self.controllers.contains_key(handle) {
            return Err(AnimatorError::ControllerNotFound);
        }
        self.run_action(handle, action, &Map::new(), data)
    }

    // ========================================================================
    // Frame tick
    // ========================================================================

    pub fn update(&mut self) {
        for delivery in self.bus.drain() {
            self.route(delivery);
        }

        // Firing can schedule zero-delay follow-ups; run those this tick too.
        let now = self.clock.now_ms();
        loop {
            let due = self.timers.drain_due(now);
            if due.is_empty() {
                break;
            }
            for task in due {
                self.fire(task, now);
            }
        }

        for controller in self.controllers.values_mut() {
            controller.last_outcome = controller.animator.step(&mut self.scene);
        }

        self.frame_count += 1;
    }

    fn route(&mut self, delivery: Delivery<ControllerHandle>) {
        let handle = delivery.subscriber;
        let Some(controller) = self.controllers.get_mut(handle) else {
            return;
        };

        let routed = resolve(controller, &delivery);
        if routed.is_empty() {
            return;
        }

        // Only deliveries that lead somewhere open the cooldown window.
        let now = self.clock.now_ms();
        if !controller.accept_at(now) {
            log::debug!(
                "Controller '{}' in cooldown; dropping '{}'",
                controller.config.id,
                delivery.channel
            );
            return;
        }

        for work in routed {
            match work {
                Routed::Relay(envelope) => {
                    log::debug!("Relaying '{}' to clients", delivery.channel);
                    self.bus.publish(SERVER_TO_CLIENT_CHANNEL, envelope);
                }
                Routed::Run {
                    action,
                    params,
                    data,
                } => self.run_logged(handle, &action, &params, &data),
            }
        }
    }

    fn run_logged(
        &mut self,
        handle: ControllerHandle,
        action: &str,
        params: &Map<String, Value>,
        data: &Value,
    ) {
        if let Err(err) = self.run_action(handle, action, params, data) {
            log::warn!("{err}");
        }
    }

    fn run_action(
        &mut self,
        handle: ControllerHandle,
        name: &str,
        params: &Map<String, Value>,
        data: &Value,
    ) -> Result<()> {
        let controller = self
            .controllers
            .get(handle)
            .ok_or(AnimatorError::ControllerNotFound)?;

        let payload = ActionPayload::merged(name, params, data)?;
        let action = Action::parse(controller.animator.kind(), name, &payload)?;
        let now = self.clock.now_ms();

        let transition = &controller.config.transition;
        if transition.use_delay && action.is_start_like() {
            let delay_s = payload.delay.unwrap_or(transition.delay);
            log::debug!(
                "Controller '{}': '{name}' held for {delay_s}s transition delay",
                controller.config.id
            );
            let Some(controller) = self.controllers.get_mut(handle) else {
                return Err(AnimatorError::ControllerNotFound);
            };
            let generation = controller.animator.defer_start();
            self.timers.schedule(
                now,
                delay_s * 1000.0,
                Deferred::Dispatch {
                    controller: handle,
                    action,
                    received_ms: now,
                    generation,
                },
            );
            return Ok(());
        }

        self.apply(handle, action, now, now);
        Ok(())
    }

    /// Dispatches `action`; a resulting delayed start is scheduled from `now`.
    fn apply(&mut self, handle: ControllerHandle, action: Action, received_ms: f64, now: f64) {
        let Some(controller) = self.controllers.get_mut(handle) else {
            return;
        };

        if let Some(pending) = controller.animator.dispatch(action, received_ms) {
            self.timers.schedule(
                now,
                pending.delay_ms,
                Deferred::BeginTargeting {
                    controller: handle,
                    generation: pending.generation,
                },
            );
        }
    }

    fn fire(&mut self, task: Deferred, now: f64) {
        match task {
            Deferred::Dispatch {
                controller,
                action,
                received_ms,
                generation,
            } => {
                let current = self
                    .controllers
                    .get(controller)
                    .is_some_and(|c| c.animator.is_current(generation));
                if current {
                    self.apply(controller, action, received_ms, now);
                } else {
                    log::debug!("Dropping superseded held action (gen {generation})");
                }
            }
            Deferred::BeginTargeting {
                controller,
                generation,
            } => {
                if let Some(c) = self.controllers.get_mut(controller) {
                    c.animator.begin_targeting(generation);
                }
            }
        }
    }
}

/// What one delivery asks of its controller.
enum Routed {
    /// Server role: forward to clients.
    Relay(Value),
    Run {
        action: String,
        params: Map<String, Value>,
        data: Value,
    },
}

fn resolve(controller: &Controller, delivery: &Delivery<ControllerHandle>) -> Vec<Routed> {
    let config = &controller.config;
    let start = || format!("set-{}", controller.animator.kind());
    let mut routed = Vec::new();

    if config.broadcast_any {
        if delivery.channel == SERVER_TO_CLIENT_CHANNEL {
            let target = delivery.payload.get("target").and_then(Value::as_str);
            if target == Some(config.id.as_str()) {
                routed.push(Routed::Run {
                    action: start(),
                    params: Map::new(),
                    data: delivery.payload.get("data").cloned().unwrap_or(Value::Null),
                });
            }
        } else if delivery.channel == config.id {
            match config.role {
                NetworkRole::Server => routed.push(Routed::Relay(
                    json!({ "target": config.id, "data": delivery.payload }),
                )),
                NetworkRole::Standalone => routed.push(Routed::Run {
                    action: start(),
                    params: Map::new(),
                    data: delivery.payload.clone(),
                }),
                NetworkRole::Client => {}
            }
        }
    }

    routed.extend(
        controller
            .receivers
            .iter()
            .filter(|b| b.event_id == delivery.channel)
            .map(|b| Routed::Run {
                action: b.action_type.clone(),
                params: b.params.clone(),
                data: delivery.payload.clone(),
            }),
    );
    routed
}
