//! Presentation/voice state of the assistant and its transition table.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistantState {
    #[default]
    Idle,
    Listening,
    Thinking,
    Speaking,
}

/// Controller events that may move the assistant between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// User asked for voice capture.
    StartListening,
    /// Typed text or a final transcript was submitted.
    Submit,
    /// The chat response arrived.
    ResponseReceived { speak: bool },
    /// The chat request failed for good.
    RequestFailed,
    /// Capture finished without a usable transcript, or errored.
    CaptureEnded,
    /// Voice playback completed or errored.
    PlaybackFinished,
    /// Session torn down.
    Reset,
}

impl AssistantState {
    /// Apply `trigger`, returning the new state, or `None` when this state
    /// has no edge for it. Callers ignore `None`.
    pub fn next(self, trigger: Trigger) -> Option<AssistantState> {
        use AssistantState::*;

        match (self, trigger) {
            (_, Trigger::Reset) => Some(Idle),
            (Idle, Trigger::StartListening) => Some(Listening),
            (Idle | Listening, Trigger::Submit) => Some(Thinking),
            (Thinking, Trigger::ResponseReceived { speak: true }) => Some(Speaking),
            (Thinking, Trigger::ResponseReceived { speak: false }) => Some(Idle),
            (Thinking, Trigger::RequestFailed) => Some(Idle),
            (Listening, Trigger::CaptureEnded) => Some(Idle),
            (Speaking, Trigger::PlaybackFinished) => Some(Idle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Listening => "listening",
            Self::Thinking => "thinking",
            Self::Speaking => "speaking",
        }
    }
}

impl std::fmt::Display for AssistantState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AssistantState::*;

    const ALL_STATES: [AssistantState; 4] = [Idle, Listening, Thinking, Speaking];

    #[test]
    fn default_is_idle() {
        assert_eq!(AssistantState::default(), Idle);
    }

    #[test]
    fn voice_round_trip() {
        let s = Idle.next(Trigger::StartListening).unwrap();
        assert_eq!(s, Listening);
        let s = s.next(Trigger::Submit).unwrap();
        assert_eq!(s, Thinking);
        let s = s.next(Trigger::ResponseReceived { speak: true }).unwrap();
        assert_eq!(s, Speaking);
        assert_eq!(s.next(Trigger::PlaybackFinished), Some(Idle));
    }

    #[test]
    fn typed_submit_from_idle() {
        assert_eq!(Idle.next(Trigger::Submit), Some(Thinking));
        assert_eq!(
            Thinking.next(Trigger::ResponseReceived { speak: false }),
            Some(Idle)
        );
        assert_eq!(Thinking.next(Trigger::RequestFailed), Some(Idle));
    }

    #[test]
    fn capture_cannot_start_while_busy() {
        assert_eq!(Speaking.next(Trigger::StartListening), None);
        assert_eq!(Thinking.next(Trigger::StartListening), None);
        assert_eq!(Listening.next(Trigger::StartListening), None);
    }

    #[test]
    fn speaking_only_reachable_from_thinking() {
        for state in ALL_STATES {
            for speak in [true, false] {
                let next = state.next(Trigger::ResponseReceived { speak });
                if state != Thinking {
                    assert_eq!(next, None, "{state} accepted a response");
                }
            }
        }
    }

    #[test]
    fn submit_ignored_while_thinking_or_speaking() {
        assert_eq!(Thinking.next(Trigger::Submit), None);
        assert_eq!(Speaking.next(Trigger::Submit), None);
    }

    #[test]
    fn reset_always_lands_in_idle() {
        for state in ALL_STATES {
            assert_eq!(state.next(Trigger::Reset), Some(Idle));
        }
    }

    #[test]
    fn capture_end_only_leaves_listening() {
        assert_eq!(Listening.next(Trigger::CaptureEnded), Some(Idle));
        assert_eq!(Thinking.next(Trigger::CaptureEnded), None);
        assert_eq!(Speaking.next(Trigger::PlaybackFinished), Some(Idle));
        assert_eq!(Idle.next(Trigger::PlaybackFinished), None);
    }
}
