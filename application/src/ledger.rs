use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use error_stack::Report;
use kernel::prelude::entity::{
    BikeId, CyclistId, EndedAt, LockId, Rental, RentalId, RentalPolicy,
};
use kernel::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct Slot {
    ticket: u64,
    bike_id: Option<BikeId>,
}

#[derive(Debug, Default)]
struct LedgerState {
    /// Every rental ever opened. Only [`RentalLedger::clear`] removes entries.
    archive: HashMap<RentalId, Rental>,
    /// Cyclist to its single in-flight rental.
    active: HashMap<CyclistId, RentalId>,
    /// Rents in flight between the eligibility check and the commit, with the
    /// bike once one has been allocated.
    reservations: HashMap<CyclistId, Slot>,
    next_ticket: u64,
}

impl LedgerState {
    fn is_busy(&self, cyclist_id: &CyclistId) -> bool {
        self.active.contains_key(cyclist_id) || self.reservations.contains_key(cyclist_id)
    }

    fn renter_of(&self, bike_id: &BikeId) -> Option<CyclistId> {
        self.active.iter().find_map(|(cyclist_id, rental_id)| {
            self.archive
                .get(rental_id)
                .filter(|rental| rental.is_active() && rental.bike_id() == bike_id)
                .map(|_| *cyclist_id)
        })
    }

    fn is_claimed(&self, bike_id: &BikeId, by_other_than: &CyclistId) -> bool {
        self.reservations.iter().any(|(cyclist_id, slot)| {
            cyclist_id != by_other_than && slot.bike_id.as_ref() == Some(bike_id)
        })
    }

    fn holds(&self, cyclist_id: &CyclistId, ticket: u64) -> bool {
        self.reservations
            .get(cyclist_id)
            .is_some_and(|slot| slot.ticket == ticket)
    }
}

/// Engine-owned store of rentals: the append-only archive plus the active
/// rental index, behind a single lock.
///
/// Every read-modify-write on the index happens inside one critical section,
/// so two `rent` calls for the same cyclist can never both see it idle. No
/// critical section awaits, which lets an abandoned [`Reservation`] give its
/// slot back from `Drop`.
#[derive(Debug, Default)]
pub struct RentalLedger {
    state: Mutex<LedgerState>,
}

impl RentalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks a rent for `cyclist_id` as in flight. Fails with `Conflict` when
    /// the cyclist already has an active rental or another rent in flight.
    ///
    /// The reservation is released when the returned guard is dropped without
    /// being committed, including when the rent future itself is dropped.
    pub fn reserve(
        &self,
        cyclist_id: &CyclistId,
    ) -> error_stack::Result<Reservation<'_>, KernelError> {
        let mut state = self.state();
        if state.is_busy(cyclist_id) {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("cyclist {cyclist_id} already has an active rental")));
        }
        let ticket = state.next_ticket;
        state.next_ticket += 1;
        state.reservations.insert(
            *cyclist_id,
            Slot {
                ticket,
                bike_id: None,
            },
        );
        Ok(Reservation {
            ledger: self,
            cyclist_id: *cyclist_id,
            ticket,
            settled: false,
        })
    }

    /// Finds the active rental holding `bike_id`, stamps its return, prices it
    /// and removes it from the active index. Returns the terminal rental.
    pub fn close(
        &self,
        bike_id: &BikeId,
        end_lock_id: LockId,
        ended_at: EndedAt,
        policy: &RentalPolicy,
    ) -> error_stack::Result<Rental, KernelError> {
        let mut state = self.state();
        let cyclist_id = state.renter_of(bike_id).ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("bike {bike_id} is not rented"))
        })?;
        let rental_id = *state.active.get(&cyclist_id).ok_or_else(|| {
            Report::new(KernelError::Internal)
                .attach_printable(format!("no active rental for cyclist {cyclist_id}"))
        })?;
        let rental = state.archive.get_mut(&rental_id).ok_or_else(|| {
            Report::new(KernelError::Internal)
                .attach_printable(format!("rental {rental_id:?} missing from the archive"))
        })?;
        rental.close(end_lock_id, ended_at, policy)?;
        let rental = rental.clone();
        state.active.remove(&cyclist_id);
        Ok(rental)
    }

    pub fn find_active(&self, cyclist_id: &CyclistId) -> Option<Rental> {
        let state = self.state();
        state
            .active
            .get(cyclist_id)
            .and_then(|rental_id| state.archive.get(rental_id))
            .cloned()
    }

    pub fn find(&self, rental_id: &RentalId) -> Option<Rental> {
        self.state().archive.get(rental_id).cloned()
    }

    pub fn all(&self) -> Vec<Rental> {
        self.state().archive.values().cloned().collect()
    }

    /// Forgets every recorded rental. Rents already in flight keep their
    /// reservation and still commit, so a charged fee always ends up with a
    /// rental behind it.
    pub fn clear(&self) {
        let mut state = self.state();
        state.archive.clear();
        state.active.clear();
    }
}

/// An in-flight rent holding the cyclist's slot in the ledger.
#[derive(Debug)]
pub struct Reservation<'a> {
    ledger: &'a RentalLedger,
    cyclist_id: CyclistId,
    ticket: u64,
    settled: bool,
}

impl Reservation<'_> {
    /// Ties the allocated bike to the reservation. Fails with `Unavailable`
    /// when the bike is already out on, or promised to, another rental.
    pub fn claim_bike(&self, bike_id: &BikeId) -> error_stack::Result<(), KernelError> {
        let mut state = self.ledger.state();
        if state.renter_of(bike_id).is_some() || state.is_claimed(bike_id, &self.cyclist_id) {
            return Err(Report::new(KernelError::Unavailable)
                .attach_printable(format!("bike {bike_id} is already rented")));
        }
        match state.reservations.get_mut(&self.cyclist_id) {
            Some(slot) if slot.ticket == self.ticket => {
                slot.bike_id = Some(*bike_id);
                Ok(())
            }
            _ => Err(Report::new(KernelError::Internal).attach_printable(format!(
                "reservation of cyclist {} is gone",
                self.cyclist_id
            ))),
        }
    }

    /// Promotes the reservation into an active rental.
    pub fn commit(mut self, rental: Rental) -> error_stack::Result<(), KernelError> {
        let mut state = self.ledger.state();
        let matches = rental.cyclist_id() == &self.cyclist_id
            && state
                .reservations
                .get(&self.cyclist_id)
                .is_some_and(|slot| {
                    slot.ticket == self.ticket && slot.bike_id.as_ref() == Some(rental.bike_id())
                });
        if !matches {
            return Err(Report::new(KernelError::Internal).attach_printable(format!(
                "rental {:?} does not match the reservation of cyclist {}",
                rental.id(),
                self.cyclist_id
            )));
        }
        state.reservations.remove(&self.cyclist_id);
        state.active.insert(self.cyclist_id, *rental.id());
        state.archive.insert(*rental.id(), rental);
        self.settled = true;
        Ok(())
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut state = self.ledger.state();
        if state.holds(&self.cyclist_id, self.ticket) {
            state.reservations.remove(&self.cyclist_id);
        }
    }
}

pub trait DependOnRentalLedger: 'static + Sync + Send {
    fn rental_ledger(&self) -> &RentalLedger;
}
