/// Decides which completed fetches may still update the state.
///
/// Every fetch carries the sequence number it was issued with. A response is
/// applied only if it is newer than everything applied so far, so a slow
/// request that straggles in after a later one never wins.
#[derive(Debug, Default)]
pub struct Reconciler {
    latest_applied: Option<u64>,
}

impl Reconciler {
    pub fn accept(&mut self, seq: u64) -> bool {
        match self.latest_applied {
            Some(latest) if seq <= latest => false,
            _ => {
                self.latest_applied = Some(seq);
                true
            }
        }
    }

    pub fn latest_applied(&self) -> Option<u64> {
        self.latest_applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_order_responses_are_applied() {
        let mut r = Reconciler::default();
        assert!(r.accept(0));
        assert!(r.accept(1));
        assert!(r.accept(2));
        assert_eq!(r.latest_applied(), Some(2));
    }

    #[test]
    fn test_straggler_is_dropped() {
        let mut r = Reconciler::default();
        assert!(r.accept(1));
        assert!(!r.accept(0));
        assert_eq!(r.latest_applied(), Some(1));
    }

    #[test]
    fn test_gaps_are_fine() {
        let mut r = Reconciler::default();
        assert!(r.accept(3));
        assert!(r.accept(7));
        assert!(!r.accept(5));
        assert!(!r.accept(7));
    }
}
