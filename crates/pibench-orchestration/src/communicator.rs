//! Collective reduction between ranks.
//!
//! Contract: every rank contributes exactly one partial sum; only the root
//! receives the total, other ranks receive `None`.

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, error};

use pibench_core::kernel::{PartialSum, PiError};
use pibench_core::precision::ArithmeticContext;
use pibench_core::FixedPoint;

use crate::reducer::PartialSlots;

/// Rank that receives the reduced total.
pub const ROOT_RANK: usize = 0;

/// A member of a rank group.
pub trait Communicator: Send {
    /// This member's rank.
    fn rank(&self) -> usize;

    /// Number of ranks in the group.
    fn size(&self) -> usize;

    /// Contribute `partial` to a sum reduction onto the root.
    ///
    /// The root blocks until every rank has contributed (or is known to be
    /// gone) and returns `Some(total)`; other ranks return `None`.
    fn reduce_sum(
        &self,
        ctx: &ArithmeticContext,
        n: u64,
        partial: PartialSum,
    ) -> Result<Option<FixedPoint>, PiError>;

    /// Whether this member is the root.
    fn is_root(&self) -> bool {
        self.rank() == ROOT_RANK
    }
}

enum Link {
    Root(Receiver<PartialSum>),
    Member(Sender<PartialSum>),
}

/// In-process communicator passing messages over crossbeam channels.
///
/// The root owns the only receiver and no sender, so once every member has
/// sent or dropped its handle the root observes a disconnected channel
/// instead of waiting forever.
pub struct ChannelCommunicator {
    rank: usize,
    size: usize,
    link: Link,
}

impl ChannelCommunicator {
    /// Create a connected group of `size` members, indexed by rank.
    #[must_use]
    pub fn group(size: usize) -> Vec<ChannelCommunicator> {
        if size == 0 {
            return Vec::new();
        }
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut group = Vec::with_capacity(size);
        group.push(ChannelCommunicator {
            rank: ROOT_RANK,
            size,
            link: Link::Root(rx),
        });
        for rank in 1..size {
            group.push(ChannelCommunicator {
                rank,
                size,
                link: Link::Member(tx.clone()),
            });
        }
        group
    }
}

impl Communicator for ChannelCommunicator {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn reduce_sum(
        &self,
        ctx: &ArithmeticContext,
        n: u64,
        partial: PartialSum,
    ) -> Result<Option<FixedPoint>, PiError> {
        match &self.link {
            Link::Member(tx) => {
                tx.send(partial).map_err(|_| {
                    PiError::Collective(format!("rank {} could not reach the root", self.rank))
                })?;
                Ok(None)
            }
            Link::Root(rx) => {
                let mut slots = PartialSlots::new(self.size);
                slots.insert(partial)?;
                while !slots.is_complete() {
                    match rx.recv() {
                        Ok(contribution) => {
                            debug!(from = contribution.range.index, "received contribution");
                            slots.insert(contribution)?;
                        }
                        Err(_) => {
                            error!(
                                received = slots.received(),
                                expected = slots.expected(),
                                "every member hung up before the reduction completed"
                            );
                            break;
                        }
                    }
                }
                slots.into_total(ctx, n).map(Some)
            }
        }
    }
}
