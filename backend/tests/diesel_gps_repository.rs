//! Integration tests for `DieselGpsRepository` against embedded PostgreSQL.

use backend::domain::ports::{GpsRepository, RepositoryError};
use backend::domain::{
    NavigationSessionChanges, NewGpsRoute, NewNavigationSession, NewTrackingPoint, RouteFilter,
};
use backend::outbound::persistence::DieselGpsRepository;
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use rust_decimal::Decimal;

mod support;

use support::{TestDatabase, handle_cluster_setup_failure, provision_database};

struct Context {
    db: TestDatabase,
    gps: DieselGpsRepository,
}

#[fixture]
fn context() -> Option<Context> {
    match provision_database("gps_repo") {
        Ok(db) => Some(Context {
            gps: DieselGpsRepository::new(db.pool.clone()),
            db,
        }),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn coordinate(micro: i64) -> Decimal {
    Decimal::new(micro, 7)
}

fn route(name: &str, vehicle_types: &[&str], max_speed_limit: i32) -> NewGpsRoute {
    NewGpsRoute {
        name: name.to_owned(),
        description: None,
        start_lat: coordinate(334_484_000),
        start_lng: coordinate(-1_120_740_000),
        end_lat: coordinate(334_520_000),
        end_lng: coordinate(-1_120_700_000),
        start_address: None,
        end_address: None,
        distance: Some(Decimal::new(320, 2)),
        estimated_time: Some(12),
        difficulty: None,
        vehicle_types: vehicle_types.iter().map(|v| (*v).to_owned()).collect(),
        waypoints: None,
        road_types: vec!["residential".to_owned()],
        max_speed_limit,
        safety_requirements: None,
        restrictions: None,
        amenities: Vec::new(),
        traffic_level: None,
        scenic_rating: Some(4),
        is_verified: false,
    }
}

fn navigation(route_id: i32, session_id: &str) -> NewNavigationSession {
    NewNavigationSession {
        route_id,
        session_id: session_id.to_owned(),
        vehicle_type: Some("lsv".to_owned()),
        status: "active".to_owned(),
        current_lat: None,
        current_lng: None,
        current_waypoint_index: 0,
        total_distance: None,
        average_speed: None,
    }
}

#[rstest]
fn routes_filter_by_vehicle_type_and_speed(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: routes_filter_by_vehicle_type_and_speed skipped");
        return;
    };

    let neighbourhood = ctx
        .db
        .block_on(ctx.gps.create_route(&route("Neighbourhood loop", &["golf_cart", "lsv"], 25)))
        .expect("route");
    ctx.db
        .block_on(ctx.gps.create_route(&route("Arterial", &["lsv"], 35)))
        .expect("route");

    let carts = ctx
        .db
        .block_on(ctx.gps.list_routes(&RouteFilter {
            vehicle_type: Some("golf_cart".to_owned()),
            max_speed_limit: None,
        }))
        .expect("list");
    assert_eq!(carts, vec![neighbourhood.clone()]);

    let slow_lsv = ctx
        .db
        .block_on(ctx.gps.list_routes(&RouteFilter {
            vehicle_type: Some("lsv".to_owned()),
            max_speed_limit: Some(25),
        }))
        .expect("list");
    assert_eq!(slow_lsv, vec![neighbourhood.clone()]);
    assert_eq!(neighbourhood.start_lat, coordinate(334_484_000));
}

#[rstest]
fn navigation_sessions_are_unique_and_update_in_place(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: navigation_sessions_are_unique_and_update_in_place skipped");
        return;
    };
    let route = ctx
        .db
        .block_on(ctx.gps.create_route(&route("Lakeside", &["golf_cart"], 20)))
        .expect("route");

    let started = ctx
        .db
        .block_on(ctx.gps.start_navigation(&navigation(route.id, "nav-1")))
        .expect("start");
    assert!(started.completed_at.is_none());

    let duplicate = ctx
        .db
        .block_on(ctx.gps.start_navigation(&navigation(route.id, "nav-1")));
    assert!(
        matches!(duplicate, Err(RepositoryError::Conflict { .. })),
        "{duplicate:?}"
    );

    let updated = ctx
        .db
        .block_on(ctx.gps.update_navigation(
            "nav-1",
            &NavigationSessionChanges {
                status: Some("completed".to_owned()),
                current_waypoint_index: Some(3),
                ..NavigationSessionChanges::default()
            },
        ))
        .expect("update")
        .expect("session exists");
    assert_eq!(updated.status, "completed");
    assert_eq!(updated.current_waypoint_index, 3);
    assert_eq!(updated.started_at, started.started_at);
    assert!(updated.completed_at.is_none());

    let missing = ctx
        .db
        .block_on(ctx.gps.update_navigation(
            "nav-missing",
            &NavigationSessionChanges {
                status: Some("paused".to_owned()),
                ..NavigationSessionChanges::default()
            },
        ))
        .expect("update runs");
    assert!(missing.is_none());

    let orphan = ctx
        .db
        .block_on(ctx.gps.start_navigation(&navigation(route.id + 1000, "nav-2")));
    assert!(matches!(orphan, Err(RepositoryError::InvalidReference { .. })));
}

#[rstest]
fn tracking_points_list_in_time_order(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: tracking_points_list_in_time_order skipped");
        return;
    };
    let at = |minute: u32| {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, minute, 0)
            .single()
            .expect("valid timestamp")
    };
    let point = |session: &str, minute: u32| NewTrackingPoint {
        session_id: session.to_owned(),
        latitude: coordinate(334_484_000),
        longitude: coordinate(-1_120_740_000),
        speed: Some(Decimal::new(1_850, 2)),
        heading: None,
        accuracy: None,
        road_type: None,
        timestamp: Some(at(minute)),
    };

    for minute in [5, 1, 3] {
        ctx.db
            .block_on(ctx.gps.record_tracking_point(&point("trip-a", minute)))
            .expect("record");
    }
    ctx.db
        .block_on(ctx.gps.record_tracking_point(&point("trip-b", 2)))
        .expect("record");

    let points = ctx
        .db
        .block_on(ctx.gps.list_tracking_points("trip-a"))
        .expect("list");
    let times: Vec<_> = points.iter().map(|p| p.timestamp).collect();
    assert_eq!(times, vec![at(1), at(3), at(5)]);
    assert!(points.iter().all(|p| p.session_id == "trip-a"));

    let none = ctx
        .db
        .block_on(ctx.gps.list_tracking_points("trip-z"))
        .expect("list");
    assert!(none.is_empty());
}
