//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects, no external files.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::{GameEvent, SkillId};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player leaves the ground
    Jump,
    /// Coin picked up
    Coin,
    /// Time slow activated
    SkillSlow,
    /// Invincibility activated
    SkillShield,
    /// Obstacles ahead removed
    SkillClear,
    /// Hit an obstacle
    Crash,
    /// Rest stop reached
    ShopOpen,
    /// Upgrade bought
    Purchase,
    /// Upgrade refused
    Denied,
}

impl SoundEffect {
    /// The sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::CoinCollected { .. } => Some(SoundEffect::Coin),
            GameEvent::SkillActivated(SkillId::TimeSlow) => Some(SoundEffect::SkillSlow),
            GameEvent::SkillActivated(SkillId::Invincible) => Some(SoundEffect::SkillShield),
            GameEvent::SkillActivated(SkillId::ClearAhead) => Some(SoundEffect::SkillClear),
            GameEvent::Crashed => Some(SoundEffect::Crash),
            GameEvent::ShopOpened => Some(SoundEffect::ShopOpen),
            GameEvent::Purchased(_) => Some(SoundEffect::Purchase),
            GameEvent::PurchaseRejected(_) => Some(SoundEffect::Denied),
            GameEvent::SkillExpired(_)
            | GameEvent::ObstaclesCleared { .. }
            | GameEvent::ShopClosed => None,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: 0.6,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Play whatever sounds a batch of events calls for
    pub fn play_events(&self, events: &[GameEvent]) {
        for event in events {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.play(effect);
            }
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let vol = self.volume;
        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Jump => self.play_jump(ctx, vol),
            SoundEffect::Coin => self.play_coin(ctx, vol),
            SoundEffect::SkillSlow => self.play_slow(ctx, vol),
            SoundEffect::SkillShield => self.play_shield(ctx, vol),
            SoundEffect::SkillClear => self.play_clear(ctx, vol),
            SoundEffect::Crash => self.play_crash(ctx, vol),
            SoundEffect::ShopOpen => {
                self.play_arpeggio(ctx, vol, &[400.0, 500.0, 600.0, 800.0], 0.1)
            }
            SoundEffect::Purchase => self.play_arpeggio(ctx, vol, &[600.0, 900.0], 0.06),
            SoundEffect::Denied => self.play_denied(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Single oscillator sweeping `from` to `to` over `len` seconds
    fn sweep(
        &self,
        ctx: &AudioContext,
        vol: f32,
        osc_type: OscillatorType,
        from: f32,
        to: f32,
        len: f64,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + len)
            .ok();
        osc.frequency().set_value_at_time(from, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(to, t + len)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + len + 0.05).ok();
    }

    /// Jump - quick rising chirp
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        self.sweep(ctx, vol * 0.3, OscillatorType::Square, 250.0, 600.0, 0.12);
    }

    /// Coin - two-note ding
    fn play_coin(&self, ctx: &AudioContext, vol: f32) {
        self.play_arpeggio(ctx, vol, &[988.0, 1319.0], 0.07);
    }

    /// Time slow - falling whoosh
    fn play_slow(&self, ctx: &AudioContext, vol: f32) {
        self.sweep(ctx, vol * 0.35, OscillatorType::Sine, 800.0, 150.0, 0.5);
    }

    /// Shield - bright shimmer
    fn play_shield(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [1200.0, 1800.0, 2400.0].iter().enumerate() {
            let delay = i as f64 * 0.02;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.2, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.35).ok();
            }
        }
    }

    /// Clear ahead - boom with a crack on top
    fn play_clear(&self, ctx: &AudioContext, vol: f32) {
        self.sweep(ctx, vol * 0.5, OscillatorType::Sawtooth, 100.0, 30.0, 0.4);

        if let Some((osc, gain)) = self.create_osc(ctx, 1500.0, OscillatorType::Square) {
            let t = ctx.current_time();
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }
    }

    /// Crash - sad descending
    fn play_crash(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }

    /// Denied - low buzz
    fn play_denied(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 110.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Ascending notes, `step` seconds apart
    fn play_arpeggio(&self, ctx: &AudioContext, vol: f32, freqs: &[f32], step: f64) {
        for (i, freq) in freqs.iter().enumerate() {
            let delay = i as f64 * step;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }
}
