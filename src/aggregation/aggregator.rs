//! Multi-leg transport aggregation.

use tracing::{debug, info};

use crate::allocation::TruckAllocator;
use crate::distance::DistanceMatrix;
use crate::error::{FreightError, FreightResult};
use crate::models::{ShipmentLeg, Stop, TransportRecord};
use crate::statistics::StatisticsStore;

/// Costs a multi-stop shipment: walks consecutive stops through the
/// distance matrix, sums what is delivered, and allocates trucks once for
/// the whole shipment.
///
/// Only the destination stop's manifest counts toward a leg; whatever the
/// first stop lists is never delivered.
///
/// # Examples
///
/// ```
/// use u_freight::aggregation::TransportAggregator;
/// use u_freight::allocation::TruckAllocator;
/// use u_freight::distance::DistanceMatrix;
/// use u_freight::models::{ProductLine, Stop};
///
/// let dm = DistanceMatrix::from_table_str("A;B;C\n0;100;250\n100;0;150\n250;150;0").unwrap();
/// let allocator = TruckAllocator::default();
/// let aggregator = TransportAggregator::new(&dm, &allocator);
///
/// let stops = vec![
///     Stop::new("A"),
///     Stop::new("B").with_product(ProductLine::new(3, "Freezer", 5, 100.0)),
///     Stop::new("C").with_product(ProductLine::new(3, "Freezer", 30, 100.0)),
/// ];
/// let record = aggregator.build_record(&stops).unwrap();
/// assert_eq!(record.total_km(), 250);
/// assert_eq!(record.total_product_count(), 35);
/// assert_eq!(record.trucks().labels(), vec!["medium"]);
/// assert_eq!(record.total_cost(), 2980.0);
/// ```
pub struct TransportAggregator<'a> {
    distances: &'a DistanceMatrix,
    allocator: &'a TruckAllocator,
}

impl<'a> TransportAggregator<'a> {
    /// Creates an aggregator over the given matrix and allocator.
    pub fn new(distances: &'a DistanceMatrix, allocator: &'a TruckAllocator) -> Self {
        Self {
            distances,
            allocator,
        }
    }

    /// Builds the transport record for `stops` without storing it.
    ///
    /// A single stop yields a record with no legs, no trucks and zero
    /// totals. Fails with [`FreightError::EmptyShipment`] for no stops and
    /// [`FreightError::CityNotFound`] for a city missing from the matrix.
    pub fn build_record(&self, stops: &[Stop]) -> FreightResult<TransportRecord> {
        if stops.is_empty() {
            return Err(FreightError::EmptyShipment);
        }

        let mut legs = Vec::with_capacity(stops.len() - 1);
        let mut total_km: u64 = 0;
        let mut total_weight_kg = 0.0;

        for pair in stops.windows(2) {
            let (origin, destination) = (&pair[0], &pair[1]);
            let distance = self
                .distances
                .distance_between(&origin.city, &destination.city)?;
            for line in &destination.products {
                line.validate()?;
            }

            let leg = ShipmentLeg::new(
                origin.city.as_str(),
                destination.city.as_str(),
                distance,
                destination.product_count(),
                destination.total_weight_kg(),
            );
            debug!(
                origin = leg.origin_city(),
                destination = leg.destination_city(),
                km = leg.distance_km(),
                weight_kg = leg.total_weight_kg(),
                "leg added"
            );

            total_km += u64::from(distance);
            total_weight_kg += leg.total_weight_kg();
            legs.push(leg);
        }

        let allocation = self.allocator.allocate(total_weight_kg, total_km as f64)?;
        let price_sum = self.allocator.price_per_km_sum(&allocation.trucks);

        Ok(TransportRecord::new(
            legs,
            allocation.cost,
            allocation.trucks,
            price_sum,
        ))
    }

    /// Builds the record for `stops` and appends it to `statistics`.
    ///
    /// Nothing is appended when building fails.
    pub fn compute_transport(
        &self,
        stops: &[Stop],
        statistics: &StatisticsStore,
    ) -> FreightResult<TransportRecord> {
        let record = self.build_record(stops)?;
        statistics.append(record.clone())?;
        info!(
            legs = record.legs().len(),
            total_km = record.total_km(),
            total_cost = record.total_cost(),
            trucks = record.truck_count(),
            "transport computed"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProductLine, TruckCategory};
    use proptest::prelude::*;

    const TABLE: &str = "A;B;C;D\n0;100;250;40\n100;0;150;70\n250;150;0;300\n40;70;300;0\n";

    fn setup() -> (DistanceMatrix, TruckAllocator) {
        (
            DistanceMatrix::from_table_str(TABLE).expect("valid"),
            TruckAllocator::default(),
        )
    }

    fn stop(city: &str, quantity: u32, weight_kg: f64) -> Stop {
        Stop::new(city).with_product(ProductLine::new(1, "Item", quantity, weight_kg))
    }

    #[test]
    fn test_three_stop_shipment() {
        let (dm, alloc) = setup();
        let agg = TransportAggregator::new(&dm, &alloc);
        let stops = vec![Stop::new("A"), stop("B", 5, 100.0), stop("C", 30, 100.0)];
        let r = agg.build_record(&stops).expect("valid");

        assert_eq!(r.legs().len(), 2);
        assert_eq!(r.legs()[0].distance_km(), 100);
        assert_eq!(r.legs()[1].distance_km(), 150);
        assert_eq!(r.total_km(), 250);
        assert_eq!(r.total_product_count(), 35);
        assert!((r.total_weight_kg() - 3_500.0).abs() < 1e-10);
        // 3.5 t -> one medium truck over 250 km
        assert_eq!(r.trucks().as_slice(), &[TruckCategory::Medium]);
        assert_eq!(r.truck_count(), 1);
        assert_eq!(r.total_cost(), 2980.0);
        assert_eq!(r.total_truck_price_sum(), 11.92);
        assert!((r.average_cost_per_km().expect("km > 0") - 11.92).abs() < 1e-10);
    }

    #[test]
    fn test_origin_manifest_is_ignored() {
        let (dm, alloc) = setup();
        let agg = TransportAggregator::new(&dm, &alloc);
        let stops = vec![stop("A", 1_000, 100.0), stop("B", 2, 10.0)];
        let r = agg.build_record(&stops).expect("valid");
        assert_eq!(r.total_product_count(), 2);
        assert!((r.total_weight_kg() - 20.0).abs() < 1e-10);
        assert_eq!(r.trucks().as_slice(), &[TruckCategory::Small]);
        assert_eq!(r.total_cost(), 487.0);
    }

    #[test]
    fn test_trucks_allocated_once_for_whole_shipment() {
        let (dm, alloc) = setup();
        let agg = TransportAggregator::new(&dm, &alloc);
        // 600 kg at each of three stops: per-leg allocation would use 3 trucks
        let stops = vec![
            Stop::new("A"),
            stop("D", 6, 100.0),
            stop("B", 6, 100.0),
            stop("C", 6, 100.0),
        ];
        let r = agg.build_record(&stops).expect("valid");
        // 40 + 70 + 150 km, 1.8 t -> small, small
        assert_eq!(r.total_km(), 260);
        assert_eq!(r.trucks().labels(), vec!["small", "small"]);
        assert_eq!(r.total_cost(), 2532.4);
        assert_eq!(r.total_truck_price_sum(), 9.74);
    }

    #[test]
    fn test_single_stop() {
        let (dm, alloc) = setup();
        let agg = TransportAggregator::new(&dm, &alloc);
        let r = agg.build_record(&[stop("A", 10, 10.0)]).expect("valid");
        assert!(r.legs().is_empty());
        assert_eq!(r.total_km(), 0);
        assert_eq!(r.total_product_count(), 0);
        assert_eq!(r.total_weight_kg(), 0.0);
        assert_eq!(r.truck_count(), 0);
        assert_eq!(r.total_cost(), 0.0);
        assert!(matches!(
            r.average_cost_per_km(),
            Err(FreightError::DivisionUndefined)
        ));
    }

    #[test]
    fn test_same_city_twice_has_undefined_average() {
        let (dm, alloc) = setup();
        let agg = TransportAggregator::new(&dm, &alloc);
        let r = agg
            .build_record(&[Stop::new("B"), stop("B", 1, 50.0)])
            .expect("valid");
        assert_eq!(r.total_km(), 0);
        assert_eq!(r.truck_count(), 1);
        assert_eq!(r.total_cost(), 0.0);
        assert!(r.average_cost_per_km().is_err());
    }

    #[test]
    fn test_empty_shipment() {
        let (dm, alloc) = setup();
        let agg = TransportAggregator::new(&dm, &alloc);
        assert!(matches!(
            agg.build_record(&[]),
            Err(FreightError::EmptyShipment)
        ));
    }

    #[test]
    fn test_unknown_city_leaves_statistics_unchanged() {
        let (dm, alloc) = setup();
        let agg = TransportAggregator::new(&dm, &alloc);
        let stats = StatisticsStore::in_memory();
        agg.compute_transport(&[Stop::new("A"), stop("B", 1, 1.0)], &stats)
            .expect("valid");

        // fails on the second leg, after the first leg was resolved
        let stops = vec![Stop::new("A"), stop("B", 1, 1.0), stop("ZZ", 1, 1.0)];
        match agg.compute_transport(&stops, &stats) {
            Err(FreightError::CityNotFound(name)) => assert_eq!(name, "ZZ"),
            other => panic!("expected CityNotFound, got {other:?}"),
        }
        assert_eq!(stats.len().expect("readable"), 1);
    }

    #[test]
    fn test_invalid_weight_rejected() {
        let (dm, alloc) = setup();
        let agg = TransportAggregator::new(&dm, &alloc);
        let stats = StatisticsStore::in_memory();
        let stops = vec![Stop::new("A"), stop("B", 1, -3.0)];
        assert!(matches!(
            agg.compute_transport(&stops, &stats),
            Err(FreightError::InvalidQuantity { .. })
        ));
        assert!(stats.is_empty().expect("readable"));
    }

    #[test]
    fn test_compute_transport_appends() {
        let (dm, alloc) = setup();
        let agg = TransportAggregator::new(&dm, &alloc);
        let stats = StatisticsStore::in_memory();
        let stops = vec![Stop::new("A"), stop("B", 5, 100.0), stop("C", 30, 100.0)];
        let r = agg.compute_transport(&stops, &stats).expect("valid");
        let stored = stats.records().expect("readable");
        assert_eq!(stored, vec![r]);

        let views = stats.list_with_route_breakdown().expect("readable");
        // 100 * 11.92, 150 * 11.92
        assert_eq!(views[0].routes[0].cost, 1192.0);
        assert_eq!(views[0].routes[1].cost, 1788.0);
    }

    proptest! {
        #[test]
        fn prop_record_invariants(
            route in prop::collection::vec(0usize..4, 1..8),
            loads in prop::collection::vec((0u32..50, 0.0f64..500.0), 8),
        ) {
            let (dm, alloc) = setup();
            let agg = TransportAggregator::new(&dm, &alloc);
            let stops: Vec<Stop> = route
                .iter()
                .zip(&loads)
                .map(|(&c, &(q, w))| stop(&dm.cities()[c], q, w))
                .collect();
            let r = agg.build_record(&stops).expect("known cities");

            prop_assert_eq!(r.legs().len(), stops.len() - 1);
            let km: u64 = r.legs().iter().map(|l| u64::from(l.distance_km())).sum();
            prop_assert_eq!(r.total_km(), km);
            let count: u64 = stops.iter().skip(1).map(Stop::product_count).sum();
            prop_assert_eq!(r.total_product_count(), count);
            prop_assert_eq!(r.truck_count(), r.trucks().len());
            if r.total_km() > 0 {
                let avg = r.average_cost_per_km().expect("km > 0");
                prop_assert!((avg - r.total_cost() / r.total_km() as f64).abs() < 1e-9);
            } else {
                prop_assert!(r.average_cost_per_km().is_err());
            }
        }
    }
}
