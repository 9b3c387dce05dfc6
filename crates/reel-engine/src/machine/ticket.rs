use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use crate::api::error::ReelError;
use crate::api::types::{ReelId, SpinId};

/// Lifecycle of one spin as seen by its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinState {
    /// At least one reel is still moving.
    Pending,
    /// Every reel has landed on the target grid.
    Settled,
    /// The machine was torn down before the spin finished.
    Cancelled,
}

#[derive(Debug)]
struct TicketShared {
    state: SpinState,
    waker: Option<Waker>,
    mismatches: Vec<ReelId>,
}

/// Completion handle returned by `ReelMachine::spin_to`.
///
/// Resolves once, after the last reel lands. It can be awaited by any executor
/// running on the frame thread, or polled through `state()` by hosts that only
/// have a frame callback.
#[derive(Debug, Clone)]
pub struct SpinTicket {
    spin: SpinId,
    shared: Rc<RefCell<TicketShared>>,
}

impl SpinTicket {
    pub(crate) fn new(spin: SpinId) -> (Self, TicketResolver) {
        let shared = Rc::new(RefCell::new(TicketShared {
            state: SpinState::Pending,
            waker: None,
            mismatches: Vec::new(),
        }));
        let resolver = TicketResolver { shared: Rc::clone(&shared) };
        (Self { spin, shared }, resolver)
    }

    pub fn id(&self) -> SpinId {
        self.spin
    }

    pub fn state(&self) -> SpinState {
        self.shared.borrow().state
    }

    pub fn is_settled(&self) -> bool {
        self.state() == SpinState::Settled
    }

    /// Reels whose target column was not found on their strip. Their rows were still
    /// forced to the target, but the strip configuration has drifted from the results.
    pub fn mismatches(&self) -> Vec<ReelId> {
        self.shared.borrow().mismatches.clone()
    }
}

impl Future for SpinTicket {
    type Output = Result<(), ReelError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut shared = self.shared.borrow_mut();
        match shared.state {
            SpinState::Settled => Poll::Ready(Ok(())),
            SpinState::Cancelled => Poll::Ready(Err(ReelError::TornDown)),
            SpinState::Pending => {
                match &shared.waker {
                    Some(existing) if existing.will_wake(cx.waker()) => {}
                    _ => shared.waker = Some(cx.waker().clone()),
                }
                Poll::Pending
            }
        }
    }
}

/// The machine's side of a ticket.
#[derive(Debug)]
pub(crate) struct TicketResolver {
    shared: Rc<RefCell<TicketShared>>,
}

impl TicketResolver {
    pub(crate) fn record_mismatch(&self, reel: ReelId) {
        self.shared.borrow_mut().mismatches.push(reel);
    }

    pub(crate) fn settle(self) {
        self.finish(SpinState::Settled);
    }

    pub(crate) fn cancel(self) {
        self.finish(SpinState::Cancelled);
    }

    fn finish(self, state: SpinState) {
        let waker = {
            let mut shared = self.shared.borrow_mut();
            if shared.state != SpinState::Pending {
                return;
            }
            shared.state = state;
            shared.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::task::Wake;

    /// Waker that counts how often it was woken.
    #[derive(Default)]
    pub(crate) struct CountingWaker(pub AtomicUsize);

    impl Wake for CountingWaker {
        fn wake(self: Arc<Self>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl CountingWaker {
        pub(crate) fn wakes(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    pub(crate) fn poll_ticket(ticket: &mut SpinTicket, waker: &Arc<CountingWaker>) -> Poll<Result<(), ReelError>> {
        let waker = Waker::from(Arc::clone(waker));
        let mut cx = Context::from_waker(&waker);
        Pin::new(ticket).poll(&mut cx)
    }

    #[test]
    fn pending_until_settled() {
        let (mut ticket, resolver) = SpinTicket::new(SpinId(1));
        let waker = Arc::new(CountingWaker::default());

        assert!(poll_ticket(&mut ticket, &waker).is_pending());
        resolver.settle();
        assert_eq!(waker.wakes(), 1);
        assert!(matches!(poll_ticket(&mut ticket, &waker), Poll::Ready(Ok(()))));
        assert!(ticket.is_settled());
    }

    #[test]
    fn cancel_resolves_with_torn_down() {
        let (mut ticket, resolver) = SpinTicket::new(SpinId(2));
        let waker = Arc::new(CountingWaker::default());
        assert!(poll_ticket(&mut ticket, &waker).is_pending());
        resolver.cancel();
        assert!(matches!(poll_ticket(&mut ticket, &waker), Poll::Ready(Err(ReelError::TornDown))));
        assert_eq!(ticket.state(), SpinState::Cancelled);
    }

    #[test]
    fn mismatches_are_visible_through_clones() {
        let (ticket, resolver) = SpinTicket::new(SpinId(3));
        let copy = ticket.clone();
        resolver.record_mismatch(ReelId(2));
        assert_eq!(copy.mismatches(), vec![ReelId(2)]);
    }
}
