use error_stack::{Report, ResultExt};
use kernel::interface::config::DependOnRentalPolicy;
use kernel::interface::gateway::{
    BikeStationGateway, BillingGateway, Clock, CyclistDirectory, DependOnBikeStationGateway,
    DependOnBillingGateway, DependOnClock, DependOnCyclistDirectory,
};
use kernel::prelude::entity::{
    BikeId, CyclistId, EndedAt, LockId, Rental, RentalId, StartedAt,
};
use kernel::KernelError;
use uuid::Uuid;

use crate::ledger::DependOnRentalLedger;
use crate::transfer::{
    CreateRentalDto, GetActiveRentalDto, GetRentalDto, RentalDto, ReturnBikeDto,
};

#[async_trait::async_trait]
pub trait RentService:
    'static
    + Sync
    + Send
    + DependOnCyclistDirectory
    + DependOnBikeStationGateway
    + DependOnBillingGateway
    + DependOnClock
    + DependOnRentalPolicy
    + DependOnRentalLedger
{
    /// Opens a rental for the cyclist with a bike taken from `start_lock_id`.
    ///
    /// Checks run in order and the first failure wins: the cyclist must be
    /// registered (`NotFound`) and eligible (`Ineligible`), must not be renting
    /// already (`Conflict`), the lock must hold a free bike (`Unavailable`) and
    /// billing must accept the fixed fee (`BillingDeclined`). Nothing is
    /// recorded unless all of them pass. Releasing the lock afterwards is best
    /// effort and never undoes the rental.
    #[tracing::instrument(skip_all, fields(cyclist_id = %dto.cyclist_id, lock_id = %dto.start_lock_id))]
    async fn rent(&self, dto: CreateRentalDto) -> error_stack::Result<RentalDto, KernelError> {
        let cyclist_id = CyclistId::new(dto.cyclist_id);
        let start_lock_id = LockId::new(dto.start_lock_id);

        let eligibility = self.cyclist_directory().eligibility(&cyclist_id).await?;
        if !eligibility.exists() {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("cyclist {cyclist_id} is not registered")));
        }
        if !eligibility.is_eligible() {
            return Err(Report::new(KernelError::Ineligible).attach_printable(format!(
                "cyclist {cyclist_id} active: {}, rental permission: {}",
                eligibility.active(),
                eligibility.has_rental_permission()
            )));
        }

        // Dropping the reservation, on error or when this future is abandoned,
        // frees the cyclist again.
        let reservation = self.rental_ledger().reserve(&cyclist_id)?;

        let bike_id = self
            .bike_station_gateway()
            .allocate_bike(&start_lock_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Unavailable)
                    .attach_printable(format!("no bike available at lock {start_lock_id}"))
            })?;
        reservation.claim_bike(&bike_id)?;

        let fixed_fee = *self.rental_policy().fixed_fee();
        let accepted = self
            .billing_gateway()
            .charge_fixed(&cyclist_id, &fixed_fee)
            .await
            .change_context(KernelError::BillingDeclined)?;
        if !accepted {
            return Err(Report::new(KernelError::BillingDeclined).attach_printable(format!(
                "fixed fee {:?} declined for cyclist {cyclist_id}",
                fixed_fee
            )));
        }

        let rental = Rental::open(
            RentalId::new(Uuid::new_v4()),
            cyclist_id,
            start_lock_id,
            bike_id,
            StartedAt::new(self.clock().now()),
            fixed_fee,
        );
        if let Err(report) = reservation.commit(rental.clone()) {
            tracing::warn!(
                %cyclist_id,
                ?fixed_fee,
                "fixed fee charged but the rental could not be recorded"
            );
            return Err(report);
        }
        tracing::info!(rental_id = ?rental.id(), %bike_id, "rental opened");

        if let Err(report) = self
            .bike_station_gateway()
            .release_lock(&start_lock_id, &bike_id, &cyclist_id)
            .await
        {
            tracing::warn!(%bike_id, "failed to release lock after rent: {report:?}");
        }

        Ok(RentalDto::from(rental))
    }
}

impl<T> RentService for T where
    T: DependOnCyclistDirectory
        + DependOnBikeStationGateway
        + DependOnBillingGateway
        + DependOnClock
        + DependOnRentalPolicy
        + DependOnRentalLedger
{
}

#[async_trait::async_trait]
pub trait ReturnService:
    'static
    + Sync
    + Send
    + DependOnBikeStationGateway
    + DependOnBillingGateway
    + DependOnClock
    + DependOnRentalPolicy
    + DependOnRentalLedger
{
    /// Closes the active rental holding `bike_id` at `end_lock_id`.
    ///
    /// Fails only with `NotFound` when the bike is not rented. Once the rental
    /// is stamped the return succeeds: a declined or failed extra-fee charge
    /// and a failed station lock are logged and otherwise ignored.
    #[tracing::instrument(skip_all, fields(bike_id = %dto.bike_id, lock_id = %dto.end_lock_id))]
    async fn return_bike(&self, dto: ReturnBikeDto) -> error_stack::Result<RentalDto, KernelError> {
        let end_lock_id = LockId::new(dto.end_lock_id);
        let bike_id = BikeId::new(dto.bike_id);
        let ended_at = EndedAt::new(self.clock().now());

        let rental = self.rental_ledger().close(
            &bike_id,
            end_lock_id,
            ended_at,
            self.rental_policy(),
        )?;
        let cyclist_id = *rental.cyclist_id();
        let extra_fee = *rental.extra_fee();
        tracing::info!(rental_id = ?rental.id(), %cyclist_id, ?extra_fee, "rental closed");

        if extra_fee.is_positive() {
            match self
                .billing_gateway()
                .charge_extra(&cyclist_id, &extra_fee)
                .await
            {
                Ok(true) => {}
                Ok(false) => {
                    tracing::warn!(%cyclist_id, ?extra_fee, "extra fee declined");
                }
                Err(report) => {
                    tracing::warn!(%cyclist_id, ?extra_fee, "extra fee charge failed: {report:?}");
                }
            }
        }

        if let Err(report) = self
            .bike_station_gateway()
            .lock_station(&end_lock_id, &bike_id, &cyclist_id, &extra_fee)
            .await
        {
            tracing::warn!(%cyclist_id, "failed to lock station after return: {report:?}");
        }

        Ok(RentalDto::from(rental))
    }
}

impl<T> ReturnService for T where
    T: DependOnBikeStationGateway
        + DependOnBillingGateway
        + DependOnClock
        + DependOnRentalPolicy
        + DependOnRentalLedger
{
}

#[async_trait::async_trait]
pub trait GetRentalService: 'static + Sync + Send + DependOnRentalLedger {
    async fn get_active_rental(
        &self,
        dto: GetActiveRentalDto,
    ) -> error_stack::Result<Option<RentalDto>, KernelError> {
        let cyclist_id = CyclistId::new(dto.cyclist_id);
        Ok(self
            .rental_ledger()
            .find_active(&cyclist_id)
            .map(RentalDto::from))
    }

    async fn get_rental(
        &self,
        dto: GetRentalDto,
    ) -> error_stack::Result<Option<RentalDto>, KernelError> {
        let rental_id = RentalId::new(dto.id);
        Ok(self.rental_ledger().find(&rental_id).map(RentalDto::from))
    }

    async fn list_rentals(&self) -> error_stack::Result<Vec<RentalDto>, KernelError> {
        Ok(self
            .rental_ledger()
            .all()
            .into_iter()
            .map(RentalDto::from)
            .collect())
    }
}

impl<T> GetRentalService for T where T: DependOnRentalLedger {}

#[cfg(test)]
mod test {
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration as StdDuration;

    use error_stack::Report;
    use kernel::interface::config::DependOnRentalPolicy;
    use kernel::interface::gateway::{
        BikeStationGateway, BillingGateway, Clock, CyclistDirectory, DependOnBikeStationGateway,
        DependOnBillingGateway, DependOnClock, DependOnCyclistDirectory,
    };
    use kernel::prelude::entity::{
        BikeId, CyclistId, Eligibility, LockId, Money, RentalPolicy,
    };
    use kernel::KernelError;
    use rust_decimal_macros::dec;
    use time::macros::datetime;
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use crate::ledger::{DependOnRentalLedger, RentalLedger};
    use crate::service::{GetRentalService, RentService, ReturnService};
    use crate::transfer::{CreateRentalDto, GetActiveRentalDto, GetRentalDto, ReturnBikeDto};

    #[derive(Default)]
    struct Directory(Mutex<HashMap<CyclistId, Eligibility>>);

    #[async_trait::async_trait]
    impl CyclistDirectory for Directory {
        async fn eligibility(
            &self,
            cyclist_id: &CyclistId,
        ) -> error_stack::Result<Eligibility, KernelError> {
            Ok(self
                .0
                .lock()
                .unwrap()
                .get(cyclist_id)
                .copied()
                .unwrap_or_else(Eligibility::unknown))
        }
    }

    #[derive(Default)]
    struct Station {
        empty_locks: Mutex<HashSet<LockId>>,
        fixed_bike: Mutex<Option<BikeId>>,
        released: Mutex<Vec<(LockId, BikeId, CyclistId)>>,
        locked: Mutex<Vec<(LockId, BikeId, CyclistId, Money)>>,
        unreachable: AtomicBool,
        broken: AtomicBool,
        delay: Option<StdDuration>,
    }

    #[async_trait::async_trait]
    impl BikeStationGateway for Station {
        async fn allocate_bike(
            &self,
            lock_id: &LockId,
        ) -> error_stack::Result<Option<BikeId>, KernelError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.broken.load(Ordering::SeqCst) {
                return Err(Report::new(KernelError::Timeout));
            }
            if self.empty_locks.lock().unwrap().contains(lock_id) {
                return Ok(None);
            }
            let bike = (*self.fixed_bike.lock().unwrap())
                .unwrap_or_else(|| BikeId::new(Uuid::new_v4()));
            Ok(Some(bike))
        }

        async fn release_lock(
            &self,
            lock_id: &LockId,
            bike_id: &BikeId,
            cyclist_id: &CyclistId,
        ) -> error_stack::Result<(), KernelError> {
            if self.unreachable.load(Ordering::SeqCst) {
                return Err(Report::new(KernelError::Timeout));
            }
            self.released
                .lock()
                .unwrap()
                .push((*lock_id, *bike_id, *cyclist_id));
            Ok(())
        }

        async fn lock_station(
            &self,
            lock_id: &LockId,
            bike_id: &BikeId,
            cyclist_id: &CyclistId,
            extra_fee: &Money,
        ) -> error_stack::Result<(), KernelError> {
            if self.unreachable.load(Ordering::SeqCst) {
                return Err(Report::new(KernelError::Timeout));
            }
            self.locked
                .lock()
                .unwrap()
                .push((*lock_id, *bike_id, *cyclist_id, *extra_fee));
            Ok(())
        }
    }

    struct Billing {
        accept_fixed: AtomicBool,
        accept_extra: AtomicBool,
        offline: AtomicBool,
        fixed: Mutex<Vec<(CyclistId, Money)>>,
        extra: Mutex<Vec<(CyclistId, Money)>>,
    }

    impl Default for Billing {
        fn default() -> Self {
            Self {
                accept_fixed: AtomicBool::new(true),
                accept_extra: AtomicBool::new(true),
                offline: AtomicBool::new(false),
                fixed: Mutex::default(),
                extra: Mutex::default(),
            }
        }
    }

    #[async_trait::async_trait]
    impl BillingGateway for Billing {
        async fn charge_fixed(
            &self,
            cyclist_id: &CyclistId,
            amount: &Money,
        ) -> error_stack::Result<bool, KernelError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(Report::new(KernelError::Timeout));
            }
            let accepted = self.accept_fixed.load(Ordering::SeqCst);
            if accepted {
                self.fixed.lock().unwrap().push((*cyclist_id, *amount));
            }
            Ok(accepted)
        }

        async fn charge_extra(
            &self,
            cyclist_id: &CyclistId,
            amount: &Money,
        ) -> error_stack::Result<bool, KernelError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(Report::new(KernelError::Timeout));
            }
            self.extra.lock().unwrap().push((*cyclist_id, *amount));
            Ok(self.accept_extra.load(Ordering::SeqCst))
        }
    }

    struct ManualClock(Mutex<OffsetDateTime>);

    impl ManualClock {
        fn advance(&self, by: Duration) {
            *self.0.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> OffsetDateTime {
            *self.0.lock().unwrap()
        }
    }

    struct Module {
        directory: Directory,
        station: Station,
        billing: Billing,
        clock: ManualClock,
        policy: RentalPolicy,
        ledger: RentalLedger,
    }

    impl Module {
        fn new() -> Self {
            Self::with_station(Station::default())
        }

        fn with_station(station: Station) -> Self {
            Self {
                directory: Directory::default(),
                station,
                billing: Billing::default(),
                clock: ManualClock(Mutex::new(datetime!(2024-03-10 08:00 UTC))),
                policy: RentalPolicy::default(),
                ledger: RentalLedger::new(),
            }
        }

        fn cyclist(&self, eligibility: Eligibility) -> CyclistId {
            let id = CyclistId::new(Uuid::new_v4());
            self.directory.0.lock().unwrap().insert(id, eligibility);
            id
        }

        fn eligible_cyclist(&self) -> CyclistId {
            self.cyclist(Eligibility::new(true, true, true))
        }
    }

    impl DependOnCyclistDirectory for Module {
        type CyclistDirectory = Directory;
        fn cyclist_directory(&self) -> &Self::CyclistDirectory {
            &self.directory
        }
    }

    impl DependOnBikeStationGateway for Module {
        type BikeStationGateway = Station;
        fn bike_station_gateway(&self) -> &Self::BikeStationGateway {
            &self.station
        }
    }

    impl DependOnBillingGateway for Module {
        type BillingGateway = Billing;
        fn billing_gateway(&self) -> &Self::BillingGateway {
            &self.billing
        }
    }

    impl DependOnClock for Module {
        type Clock = ManualClock;
        fn clock(&self) -> &Self::Clock {
            &self.clock
        }
    }

    impl DependOnRentalPolicy for Module {
        fn rental_policy(&self) -> &RentalPolicy {
            &self.policy
        }
    }

    impl DependOnRentalLedger for Module {
        fn rental_ledger(&self) -> &RentalLedger {
            &self.ledger
        }
    }

    fn rent_dto(cyclist_id: CyclistId) -> CreateRentalDto {
        CreateRentalDto {
            cyclist_id: cyclist_id.into(),
            start_lock_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn rent_opens_active_rental() -> error_stack::Result<(), KernelError> {
        let module = Module::new();
        let cyclist_id = module.eligible_cyclist();
        let dto = rent_dto(cyclist_id);
        let lock_id = dto.start_lock_id;

        let rental = module.rent(dto).await?;

        assert_eq!(rental.cyclist_id, Uuid::from(cyclist_id));
        assert_eq!(rental.start_lock_id, lock_id);
        assert_eq!(rental.started_at, datetime!(2024-03-10 08:00 UTC));
        assert_eq!(rental.ended_at, None);
        assert_eq!(rental.end_lock_id, None);
        assert_eq!(rental.fixed_fee, dec!(10.00));
        assert_eq!(rental.extra_fee, dec!(0.00));

        let charged = module.billing.fixed.lock().unwrap().clone();
        assert_eq!(charged, vec![(cyclist_id, Money::new(dec!(10.00)))]);
        let released = module.station.released.lock().unwrap().clone();
        assert_eq!(
            released,
            vec![(LockId::new(lock_id), BikeId::new(rental.bike_id), cyclist_id)]
        );

        let active = module
            .get_active_rental(GetActiveRentalDto {
                cyclist_id: cyclist_id.into(),
            })
            .await?;
        assert_eq!(active, Some(rental));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_cyclist_cannot_rent() {
        let module = Module::new();
        let report = module
            .rent(rent_dto(CyclistId::new(Uuid::new_v4())))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        assert!(module.billing.fixed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn inactive_or_unpermitted_cyclist_cannot_rent() {
        let module = Module::new();
        for eligibility in [
            Eligibility::new(true, false, true),
            Eligibility::new(true, true, false),
            Eligibility::new(true, false, false),
        ] {
            let cyclist_id = module.cyclist(eligibility);
            let report = module.rent(rent_dto(cyclist_id)).await.unwrap_err();
            assert_eq!(report.current_context(), &KernelError::Ineligible);
        }
        assert!(module.list_rentals().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_rent_conflicts() {
        let module = Module::new();
        let cyclist_id = module.eligible_cyclist();
        let first = module.rent(rent_dto(cyclist_id)).await.unwrap();

        let report = module.rent(rent_dto(cyclist_id)).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);

        let active = module
            .get_active_rental(GetActiveRentalDto {
                cyclist_id: cyclist_id.into(),
            })
            .await
            .unwrap();
        assert_eq!(active, Some(first));
        assert_eq!(module.billing.fixed.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_lock_is_unavailable_and_not_charged() {
        let module = Module::new();
        let cyclist_id = module.eligible_cyclist();
        let dto = rent_dto(cyclist_id);
        module
            .station
            .empty_locks
            .lock()
            .unwrap()
            .insert(LockId::new(dto.start_lock_id));

        let report = module.rent(dto).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Unavailable);
        assert!(module.billing.fixed.lock().unwrap().is_empty());

        // The failed attempt must not block a later one.
        assert!(module.rent(rent_dto(cyclist_id)).await.is_ok());
    }

    #[tokio::test]
    async fn declined_fixed_fee_creates_nothing() {
        let module = Module::new();
        let cyclist_id = module.eligible_cyclist();
        module.billing.accept_fixed.store(false, Ordering::SeqCst);

        let report = module.rent(rent_dto(cyclist_id)).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::BillingDeclined);
        assert!(module.list_rentals().await.unwrap().is_empty());
        assert!(module
            .get_active_rental(GetActiveRentalDto {
                cyclist_id: cyclist_id.into(),
            })
            .await
            .unwrap()
            .is_none());
        assert!(module.station.released.lock().unwrap().is_empty());

        module.billing.accept_fixed.store(true, Ordering::SeqCst);
        assert!(module.rent(rent_dto(cyclist_id)).await.is_ok());
    }

    #[tokio::test]
    async fn bike_already_out_is_unavailable() {
        let bike_id = BikeId::new(Uuid::new_v4());
        let station = Station::default();
        *station.fixed_bike.lock().unwrap() = Some(bike_id);
        let module = Module::with_station(station);

        let first = module.eligible_cyclist();
        let second = module.eligible_cyclist();
        module.rent(rent_dto(first)).await.unwrap();

        let report = module.rent(rent_dto(second)).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Unavailable);
        assert_eq!(module.billing.fixed.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_lock_release_keeps_rental() {
        let module = Module::new();
        module.station.unreachable.store(true, Ordering::SeqCst);
        let cyclist_id = module.eligible_cyclist();

        let rental = module.rent(rent_dto(cyclist_id)).await.unwrap();
        assert_eq!(rental.ended_at, None);
        assert_eq!(module.list_rentals().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn return_after_130_minutes_charges_one_hour() -> error_stack::Result<(), KernelError>
    {
        let module = Module::new();
        let cyclist_id = module.eligible_cyclist();
        let rental = module.rent(rent_dto(cyclist_id)).await?;

        module.clock.advance(Duration::minutes(130));
        let end_lock = Uuid::new_v4();
        let returned = module
            .return_bike(ReturnBikeDto {
                end_lock_id: end_lock,
                bike_id: rental.bike_id,
            })
            .await?;

        assert_eq!(returned.id, rental.id);
        assert_eq!(returned.extra_fee, dec!(5.00));
        assert_eq!(returned.end_lock_id, Some(end_lock));
        assert_eq!(
            returned.ended_at,
            Some(datetime!(2024-03-10 08:00 UTC) + Duration::minutes(130))
        );
        assert!(module
            .get_active_rental(GetActiveRentalDto {
                cyclist_id: cyclist_id.into(),
            })
            .await?
            .is_none());

        let extra = module.billing.extra.lock().unwrap().clone();
        assert_eq!(extra, vec![(cyclist_id, Money::new(dec!(5.00)))]);
        let locked = module.station.locked.lock().unwrap().clone();
        assert_eq!(
            locked,
            vec![(
                LockId::new(end_lock),
                BikeId::new(rental.bike_id),
                cyclist_id,
                Money::new(dec!(5.00))
            )]
        );
        Ok(())
    }

    #[tokio::test]
    async fn short_return_charges_nothing_extra() {
        let module = Module::new();
        let cyclist_id = module.eligible_cyclist();
        let rental = module.rent(rent_dto(cyclist_id)).await.unwrap();

        module.clock.advance(Duration::minutes(119));
        let returned = module
            .return_bike(ReturnBikeDto {
                end_lock_id: Uuid::new_v4(),
                bike_id: rental.bike_id,
            })
            .await
            .unwrap();

        assert_eq!(returned.extra_fee, dec!(0));
        assert!(module.billing.extra.lock().unwrap().is_empty());
        assert_eq!(module.station.locked.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn declined_extra_fee_still_returns() {
        let module = Module::new();
        module.billing.accept_extra.store(false, Ordering::SeqCst);
        let cyclist_id = module.eligible_cyclist();
        let rental = module.rent(rent_dto(cyclist_id)).await.unwrap();

        module.clock.advance(Duration::minutes(185));
        module.station.unreachable.store(true, Ordering::SeqCst);
        let returned = module
            .return_bike(ReturnBikeDto {
                end_lock_id: Uuid::new_v4(),
                bike_id: rental.bike_id,
            })
            .await
            .unwrap();

        assert_eq!(returned.extra_fee, dec!(10.00));
        assert!(returned.ended_at.is_some());
        assert_eq!(module.billing.extra.lock().unwrap().len(), 1);
        assert!(module.rent(rent_dto(cyclist_id)).await.is_ok());
    }

    #[tokio::test]
    async fn returning_unrented_bike_is_not_found() {
        let module = Module::new();
        let report = module
            .return_bike(ReturnBikeDto {
                end_lock_id: Uuid::new_v4(),
                bike_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
    }

    #[tokio::test]
    async fn archive_keeps_terminal_rentals() {
        let module = Module::new();
        let cyclist_id = module.eligible_cyclist();
        let rental = module.rent(rent_dto(cyclist_id)).await.unwrap();
        module
            .return_bike(ReturnBikeDto {
                end_lock_id: Uuid::new_v4(),
                bike_id: rental.bike_id,
            })
            .await
            .unwrap();
        module.rent(rent_dto(cyclist_id)).await.unwrap();

        let rentals = module.list_rentals().await.unwrap();
        assert_eq!(rentals.len(), 2);
        assert_eq!(rentals.iter().filter(|r| r.ended_at.is_none()).count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_rents_for_one_cyclist_admit_one() {
        let module = Arc::new(Module::with_station(Station {
            delay: Some(StdDuration::from_millis(20)),
            ..Station::default()
        }));
        let cyclist_id = module.eligible_cyclist();

        let tasks = (0..16)
            .map(|_| {
                let module = Arc::clone(&module);
                tokio::spawn(async move { module.rent(rent_dto(cyclist_id)).await })
            })
            .collect::<Vec<_>>();

        let mut succeeded = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(report) => assert_eq!(report.current_context(), &KernelError::Conflict),
            }
        }
        assert_eq!(succeeded, 1);
        assert_eq!(module.billing.fixed.lock().unwrap().len(), 1);
        assert_eq!(module.list_rentals().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_rents_never_share_a_bike() {
        let bike_id = BikeId::new(Uuid::new_v4());
        let station = Station {
            delay: Some(StdDuration::from_millis(5)),
            ..Station::default()
        };
        *station.fixed_bike.lock().unwrap() = Some(bike_id);
        let module = Arc::new(Module::with_station(station));

        let tasks = (0..8)
            .map(|_| {
                let module = Arc::clone(&module);
                let cyclist_id = module.eligible_cyclist();
                tokio::spawn(async move { module.rent(rent_dto(cyclist_id)).await })
            })
            .collect::<Vec<_>>();

        let mut succeeded = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(report) => assert_eq!(report.current_context(), &KernelError::Unavailable),
            }
        }
        assert_eq!(succeeded, 1);
        let active = module
            .list_rentals()
            .await
            .unwrap()
            .into_iter()
            .filter(|rental| rental.ended_at.is_none())
            .count();
        assert_eq!(active, 1);
    }

    #[tokio::test]
    async fn billing_outage_on_rent_is_declined() {
        let module = Module::new();
        let cyclist_id = module.eligible_cyclist();
        module.billing.offline.store(true, Ordering::SeqCst);

        let report = module.rent(rent_dto(cyclist_id)).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::BillingDeclined);
        assert!(module.list_rentals().await.unwrap().is_empty());
        assert!(module.station.released.lock().unwrap().is_empty());

        module.billing.offline.store(false, Ordering::SeqCst);
        assert!(module.rent(rent_dto(cyclist_id)).await.is_ok());
    }

    #[tokio::test]
    async fn station_failure_on_allocate_propagates() {
        let module = Module::new();
        let cyclist_id = module.eligible_cyclist();
        module.station.broken.store(true, Ordering::SeqCst);

        let report = module.rent(rent_dto(cyclist_id)).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Timeout);
        assert!(module.billing.fixed.lock().unwrap().is_empty());

        module.station.broken.store(false, Ordering::SeqCst);
        assert!(module.rent(rent_dto(cyclist_id)).await.is_ok());
    }

    #[tokio::test]
    async fn billing_outage_on_return_still_closes() {
        let module = Module::new();
        let cyclist_id = module.eligible_cyclist();
        let rental = module.rent(rent_dto(cyclist_id)).await.unwrap();

        module.clock.advance(Duration::minutes(125));
        module.billing.offline.store(true, Ordering::SeqCst);
        let returned = module
            .return_bike(ReturnBikeDto {
                end_lock_id: Uuid::new_v4(),
                bike_id: rental.bike_id,
            })
            .await
            .unwrap();

        assert_eq!(returned.extra_fee, dec!(5.00));
        assert!(returned.ended_at.is_some());
        assert!(module.billing.extra.lock().unwrap().is_empty());
        assert_eq!(module.station.locked.lock().unwrap().len(), 1);
        assert!(module
            .get_active_rental(GetActiveRentalDto {
                cyclist_id: cyclist_id.into(),
            })
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn aborted_rent_frees_cyclist() {
        let module = Arc::new(Module::with_station(Station {
            delay: Some(StdDuration::from_millis(200)),
            ..Station::default()
        }));
        let cyclist_id = module.eligible_cyclist();

        let pending = {
            let module = Arc::clone(&module);
            tokio::spawn(async move { module.rent(rent_dto(cyclist_id)).await })
        };
        tokio::time::sleep(StdDuration::from_millis(20)).await;
        pending.abort();
        assert!(pending.await.unwrap_err().is_cancelled());

        let rental = module.rent(rent_dto(cyclist_id)).await.unwrap();
        assert_eq!(rental.cyclist_id, Uuid::from(cyclist_id));
        assert_eq!(module.billing.fixed.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rental_lookup_by_id() {
        let module = Module::new();
        let cyclist_id = module.eligible_cyclist();
        let rental = module.rent(rent_dto(cyclist_id)).await.unwrap();

        let found = module
            .get_rental(GetRentalDto { id: rental.id })
            .await
            .unwrap();
        assert_eq!(found, Some(rental));
        let missing = module
            .get_rental(GetRentalDto { id: Uuid::new_v4() })
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
