use std::ops::Deref;
use std::sync::Arc;

use application::ledger::{DependOnRentalLedger, RentalLedger};
use kernel::interface::config::DependOnRentalPolicy;
use kernel::interface::gateway::{
    Clock, DependOnBikeStationGateway, DependOnBillingGateway, DependOnClock,
    DependOnCyclistDirectory,
};
use kernel::interface::query::{DependOnCardQuery, DependOnCyclistQuery, DependOnStaffQuery};
use kernel::interface::update::{
    DependOnCardModifier, DependOnCyclistModifier, DependOnStaffModifier,
};
use kernel::prelude::entity::RentalPolicy;
use kernel::KernelError;

use crate::config::load_rental_policy;
use crate::database::{InMemoryCardRepository, InMemoryCyclistRepository, InMemoryStaffRepository};
use crate::gateway::{SimulatedBillingGateway, SimulatedStationGateway, SystemClock};

/// Cheaply clonable handle on a fully wired [`Handler`]. Every application
/// service is available on it.
pub struct AppModule<C = SystemClock>(Arc<Handler<C>>);

impl<C> Clone for AppModule<C> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl AppModule {
    pub fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init()?)))
    }
}

impl<C: Clock> AppModule<C> {
    pub fn with(handler: Handler<C>) -> Self {
        Self(Arc::new(handler))
    }
}

impl<C> Deref for AppModule<C> {
    type Target = Handler<C>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<C = SystemClock> {
    cyclists: InMemoryCyclistRepository,
    cards: InMemoryCardRepository,
    staff: InMemoryStaffRepository,
    stations: SimulatedStationGateway,
    billing: SimulatedBillingGateway,
    ledger: RentalLedger,
    policy: RentalPolicy,
    clock: C,
}

impl Handler {
    pub fn init() -> error_stack::Result<Self, KernelError> {
        let policy = load_rental_policy()?;
        tracing::info!(?policy, "rental policy loaded");
        Ok(Self::with_clock(policy, SystemClock))
    }
}

impl<C: Clock> Handler<C> {
    pub fn with_clock(policy: RentalPolicy, clock: C) -> Self {
        Self {
            cyclists: InMemoryCyclistRepository::new(),
            cards: InMemoryCardRepository::new(),
            staff: InMemoryStaffRepository::new(),
            stations: SimulatedStationGateway::new(),
            billing: SimulatedBillingGateway::new(),
            ledger: RentalLedger::new(),
            policy,
            clock,
        }
    }

    pub fn stations(&self) -> &SimulatedStationGateway {
        &self.stations
    }

    pub fn billing(&self) -> &SimulatedBillingGateway {
        &self.billing
    }
}

impl<C: Clock> DependOnCyclistQuery for Handler<C> {
    type CyclistQuery = InMemoryCyclistRepository;
    fn cyclist_query(&self) -> &Self::CyclistQuery {
        &self.cyclists
    }
}

impl<C: Clock> DependOnCyclistModifier for Handler<C> {
    type CyclistModifier = InMemoryCyclistRepository;
    fn cyclist_modifier(&self) -> &Self::CyclistModifier {
        &self.cyclists
    }
}

impl<C: Clock> DependOnCyclistDirectory for Handler<C> {
    type CyclistDirectory = InMemoryCyclistRepository;
    fn cyclist_directory(&self) -> &Self::CyclistDirectory {
        &self.cyclists
    }
}

impl<C: Clock> DependOnCardQuery for Handler<C> {
    type CardQuery = InMemoryCardRepository;
    fn card_query(&self) -> &Self::CardQuery {
        &self.cards
    }
}

impl<C: Clock> DependOnCardModifier for Handler<C> {
    type CardModifier = InMemoryCardRepository;
    fn card_modifier(&self) -> &Self::CardModifier {
        &self.cards
    }
}

impl<C: Clock> DependOnStaffQuery for Handler<C> {
    type StaffQuery = InMemoryStaffRepository;
    fn staff_query(&self) -> &Self::StaffQuery {
        &self.staff
    }
}

impl<C: Clock> DependOnStaffModifier for Handler<C> {
    type StaffModifier = InMemoryStaffRepository;
    fn staff_modifier(&self) -> &Self::StaffModifier {
        &self.staff
    }
}

impl<C: Clock> DependOnBikeStationGateway for Handler<C> {
    type BikeStationGateway = SimulatedStationGateway;
    fn bike_station_gateway(&self) -> &Self::BikeStationGateway {
        &self.stations
    }
}

impl<C: Clock> DependOnBillingGateway for Handler<C> {
    type BillingGateway = SimulatedBillingGateway;
    fn billing_gateway(&self) -> &Self::BillingGateway {
        &self.billing
    }
}

impl<C: Clock> DependOnClock for Handler<C> {
    type Clock = C;
    fn clock(&self) -> &Self::Clock {
        &self.clock
    }
}

impl<C: Clock> DependOnRentalPolicy for Handler<C> {
    fn rental_policy(&self) -> &RentalPolicy {
        &self.policy
    }
}

impl<C: Clock> DependOnRentalLedger for Handler<C> {
    fn rental_ledger(&self) -> &RentalLedger {
        &self.ledger
    }
}
