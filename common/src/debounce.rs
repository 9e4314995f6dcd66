//! 入力のデバウンス
//!
//! タイマーそのものは持たず、チケットで「最新の保留値か」を判定する。
//! ホスト側は `push` のたびに `delay()` 後に `fire(ticket)` を呼ぶタイマーを張り、
//! 以前のタイマーは取り消す。取り消し漏れで古いタイマーが発火しても、
//! 古いチケットでは値は昇格しない。

use std::time::Duration;

/// 検索語のデバウンス時間
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(1000);

/// 保留中の値を識別するチケット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebounceTicket(u64);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    next_ticket: u64,
    pending: Option<(DebounceTicket, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_ticket: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 値を保留する。保留中の値があれば置き換える
    pub fn push(&mut self, value: T) -> DebounceTicket {
        self.next_ticket += 1;
        let ticket = DebounceTicket(self.next_ticket);
        self.pending = Some((ticket, value));
        ticket
    }

    /// タイマー発火。最新のチケットなら保留値を返す
    pub fn fire(&mut self, ticket: DebounceTicket) -> Option<T> {
        let is_latest = matches!(&self.pending, Some((pending, _)) if *pending == ticket);
        if !is_latest {
            return None;
        }
        self.pending.take().map(|(_, value)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value_fires() {
        let mut debouncer = Debouncer::default();
        let ticket = debouncer.push("sunset".to_string());
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.fire(ticket).as_deref(), Some("sunset"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_rapid_edits_collapse_to_latest() {
        let mut debouncer = Debouncer::default();
        let tickets: Vec<_> = ["s", "su", "sun", "sunset", "sunset2"]
            .iter()
            .map(|v| debouncer.push(v.to_string()))
            .collect();

        // 古いタイマーは何も昇格させない
        for ticket in &tickets[..tickets.len() - 1] {
            assert_eq!(debouncer.fire(*ticket), None);
        }
        assert_eq!(debouncer.fire(tickets[4]).as_deref(), Some("sunset2"));
    }

    #[test]
    fn test_fire_twice_only_promotes_once() {
        let mut debouncer = Debouncer::default();
        let ticket = debouncer.push(1);
        assert_eq!(debouncer.fire(ticket), Some(1));
        assert_eq!(debouncer.fire(ticket), None);
    }

    #[test]
    fn test_default_delay() {
        let debouncer: Debouncer<String> = Debouncer::default();
        assert_eq!(debouncer.delay(), Duration::from_millis(1000));
    }
}
