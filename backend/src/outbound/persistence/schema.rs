//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration, then restore the
//! Rust-side renames marked with `sql_name`.

diesel::table! {
    /// Golf-cart manufacturers. `name` is unique.
    brands (id) {
        id -> Int4,
        name -> Text,
        description -> Nullable<Text>,
        specialization -> Nullable<Text>,
        key_features -> Array<Text>,
        website -> Nullable<Text>,
        market_position -> Nullable<Text>,
        logo_url -> Nullable<Text>,
    }
}

diesel::table! {
    /// Vehicle models. Renamed on the Rust side to avoid clashing with the
    /// row `models` module.
    #[sql_name = "models"]
    vehicle_models (id) {
        id -> Int4,
        brand_id -> Int4,
        name -> Text,
        year -> Nullable<Int4>,
        vehicle_type -> Nullable<Text>,
        battery_type -> Nullable<Text>,
        voltage -> Nullable<Int4>,
        range -> Nullable<Int4>,
        top_speed -> Nullable<Int4>,
        seating_capacity -> Nullable<Int4>,
        price -> Nullable<Numeric>,
        features -> Array<Text>,
        image_url -> Nullable<Text>,
    }
}

diesel::table! {
    wiring_diagrams (id) {
        id -> Int4,
        model_id -> Nullable<Int4>,
        brand_id -> Nullable<Int4>,
        title -> Text,
        description -> Nullable<Text>,
        year -> Nullable<Int4>,
        /// Base64-encoded image bytes.
        image_data -> Nullable<Text>,
        file_name -> Nullable<Text>,
        mime_type -> Nullable<Text>,
        file_size -> Nullable<Int4>,
        uploaded_at -> Timestamptz,
        image_url -> Nullable<Text>,
        is_custom_drawing -> Bool,
        tags -> Array<Text>,
    }
}

diesel::table! {
    suppliers (id) {
        id -> Int4,
        name -> Text,
        contact_email -> Nullable<Text>,
        phone -> Nullable<Text>,
        website -> Nullable<Text>,
        location -> Nullable<Text>,
        specialization -> Nullable<Text>,
    }
}

diesel::table! {
    /// Parts catalogue. Compatibility columns hold brand and model names,
    /// not foreign keys.
    parts (id) {
        id -> Int4,
        part_number -> Text,
        name -> Text,
        description -> Nullable<Text>,
        category -> Nullable<Text>,
        price -> Nullable<Numeric>,
        supplier_id -> Nullable<Int4>,
        compatible_brands -> Array<Text>,
        compatible_models -> Array<Text>,
        in_stock -> Bool,
        image_url -> Nullable<Text>,
        specifications -> Nullable<Jsonb>,
    }
}

diesel::table! {
    /// Cart lines, owned by the session identity in `session_id`.
    cart_items (id) {
        id -> Int4,
        session_id -> Text,
        part_id -> Int4,
        quantity -> Int4,
        added_at -> Timestamptz,
    }
}

diesel::table! {
    gps_routes (id) {
        id -> Int4,
        name -> Text,
        description -> Nullable<Text>,
        start_lat -> Numeric,
        start_lng -> Numeric,
        end_lat -> Numeric,
        end_lng -> Numeric,
        start_address -> Nullable<Text>,
        end_address -> Nullable<Text>,
        distance -> Nullable<Numeric>,
        estimated_time -> Nullable<Int4>,
        difficulty -> Nullable<Text>,
        vehicle_types -> Array<Text>,
        waypoints -> Nullable<Jsonb>,
        road_types -> Array<Text>,
        max_speed_limit -> Int4,
        safety_requirements -> Nullable<Jsonb>,
        restrictions -> Nullable<Jsonb>,
        amenities -> Array<Text>,
        traffic_level -> Nullable<Text>,
        scenic_rating -> Nullable<Int4>,
        is_verified -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Live navigation sessions keyed by the caller-chosen `session_id`.
    navigation_sessions (id) {
        id -> Int4,
        route_id -> Int4,
        session_id -> Text,
        vehicle_type -> Nullable<Text>,
        status -> Text,
        current_lat -> Nullable<Numeric>,
        current_lng -> Nullable<Numeric>,
        current_waypoint_index -> Int4,
        started_at -> Timestamptz,
        completed_at -> Nullable<Timestamptz>,
        total_distance -> Nullable<Numeric>,
        average_speed -> Nullable<Numeric>,
    }
}

diesel::table! {
    /// Append-only position log.
    gps_tracking_points (id) {
        id -> Int4,
        session_id -> Text,
        latitude -> Numeric,
        longitude -> Numeric,
        speed -> Nullable<Numeric>,
        heading -> Nullable<Numeric>,
        accuracy -> Nullable<Numeric>,
        road_type -> Nullable<Text>,
        #[sql_name = "timestamp"]
        recorded_at -> Timestamptz,
    }
}

diesel::joinable!(vehicle_models -> brands (brand_id));
diesel::joinable!(parts -> suppliers (supplier_id));
diesel::joinable!(cart_items -> parts (part_id));
diesel::joinable!(navigation_sessions -> gps_routes (route_id));

diesel::allow_tables_to_appear_in_same_query!(
    brands,
    vehicle_models,
    wiring_diagrams,
    suppliers,
    parts,
    cart_items,
    gps_routes,
    navigation_sessions,
    gps_tracking_points,
);
