use rand::Rng;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_RANDOM_LEN: usize = 13;

/// Analytics session: one id per burst of activity.
pub(crate) struct Session {
    id: Option<String>,
    last_event_ms: u64,
    timeout_ms: u64,
}

impl Session {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            id: None,
            last_event_ms: 0,
            timeout_ms,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Session id for an event at `now_ms`, rotating it when the previous
    /// event is older than the timeout.
    pub fn touch(&mut self, now_ms: u64) -> &str {
        if now_ms.saturating_sub(self.last_event_ms) > self.timeout_ms {
            self.id = None;
        }
        self.last_event_ms = now_ms;
        self.id.get_or_insert_with(|| new_session_id(now_ms))
    }
}

/// `<millis>-<13 base36 chars>`
fn new_session_id(now_ms: u64) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_RANDOM_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("{}-{}", now_ms, suffix)
}
