//! Sound capability handed to the simulator.
//!
//! The simulator never owns audio. It is constructed with a [`SoundPlayer`]
//! and calls [`SoundPlayer::play`] with a sound name when a particle is
//! clicked; mixing, loading and muting belong to whoever implements it.
//!
//! Any `FnMut(&str)` closure is a player:
//!
//! ```ignore
//! let sim = Simulator::seeded(config, 7, |name: &str| audio.play_se(name))?;
//! ```

/// Plays a named sound effect.
pub trait SoundPlayer {
    fn play(&mut self, name: &str);
}

impl<F: FnMut(&str)> SoundPlayer for F {
    fn play(&mut self, name: &str) {
        self(name)
    }
}

/// A player that drops every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&mut self, _name: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_player() {
        let mut played = Vec::new();
        {
            let mut player = |name: &str| played.push(name.to_string());
            player.play("particle-click");
            player.play("wood-knock");
        }
        assert_eq!(played, vec!["particle-click", "wood-knock"]);
    }

    #[test]
    fn test_silent_player() {
        let mut player: Box<dyn SoundPlayer> = Box::new(Silent);
        player.play("anything");
    }
}
