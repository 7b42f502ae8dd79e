//! Diesel schema for room booking persistence.

diesel::table! {
    /// Bookable meeting rooms; never deleted, only deactivated.
    rooms (id) {
        /// Room identifier.
        id -> Uuid,
        /// Room name, unique among active rooms.
        #[max_length = 20]
        name -> Varchar,
        /// Seat capacity.
        seats -> Int4,
        /// Soft-delete marker.
        active -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Room bookings over half-open `[start_at, end_at)` intervals.
    allocations (id) {
        /// Allocation identifier.
        id -> Uuid,
        /// Booked room.
        room_id -> Uuid,
        /// Meeting subject.
        #[max_length = 60]
        subject -> Varchar,
        /// Booking employee display name.
        #[max_length = 20]
        employee_name -> Varchar,
        /// Booking employee e-mail address.
        #[max_length = 30]
        employee_email -> Varchar,
        /// Inclusive start.
        start_at -> Timestamptz,
        /// Exclusive end.
        end_at -> Timestamptz,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(allocations -> rooms (room_id));
diesel::allow_tables_to_appear_in_same_query!(rooms, allocations);
