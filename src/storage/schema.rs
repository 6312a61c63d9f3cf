//! Diesel schema for the maintenance store.

diesel::table! {
    /// Line sections keyed by their stable external code.
    sections (id) {
        /// Section identifier (UUID text).
        id -> Text,
        /// Unique external code.
        code -> Text,
        /// Display name.
        name -> Text,
        /// Free-form description.
        description -> Text,
    }
}

diesel::table! {
    /// Technicians who file records.
    technicians (id) {
        /// Technician identifier (UUID text).
        id -> Text,
        /// Display name.
        name -> Text,
        /// Optional role label.
        role -> Nullable<Text>,
        /// Membership status (`active` or `retired`).
        status -> Text,
    }
}

diesel::table! {
    /// Sub-parts offered per section.
    components (id) {
        /// Component identifier (UUID text).
        id -> Text,
        /// Owning section code.
        section_code -> Text,
        /// Display name.
        name -> Text,
        /// Membership status (`active` or `retired`).
        status -> Text,
    }
}

diesel::table! {
    /// Maintenance records and fault reports.
    work_orders (id) {
        /// Record identifier (UUID text).
        id -> Text,
        /// Owning section.
        section_id -> Text,
        /// Filing technician, if known.
        technician_id -> Nullable<Text>,
        /// Minute stamp used for ordering and range queries.
        date -> Text,
        /// Record type label.
        work_type -> Text,
        /// Optional failure classification.
        failure_type -> Nullable<Text>,
        /// Optional component name.
        component -> Nullable<Text>,
        /// Narrative of the work or fault.
        description -> Text,
        /// Minutes of downtime.
        downtime_minutes -> Integer,
        /// Whether the machine was stopped.
        machine_stopped -> Bool,
        /// Creation minute stamp.
        created_at -> Text,
        /// Whether the record is resolved.
        resolved -> Bool,
        /// Resolution narrative.
        resolution_description -> Nullable<Text>,
        /// Resolution minute stamp.
        resolved_at -> Nullable<Text>,
    }
}

diesel::table! {
    /// Evidence files linked to records.
    attachments (id) {
        /// Attachment identifier (UUID text).
        id -> Text,
        /// Parent record.
        work_order_id -> Text,
        /// Stored file name, unique across the namespace.
        filename -> Text,
        /// Client-declared media type.
        mime_type -> Nullable<Text>,
        /// Path of the stored payload.
        storage_path -> Text,
        /// SHA-256 hex digest of the payload.
        content_digest -> Text,
        /// Upload minute stamp.
        created_at -> Text,
    }
}

diesel::table! {
    /// Spare-part and help requests.
    intake_requests (id) {
        /// Request identifier (UUID text).
        id -> Text,
        /// `spare_part` or `help`.
        kind -> Text,
        /// Optional section.
        section_id -> Nullable<Text>,
        /// Requesting technician for spare-part requests.
        technician_id -> Nullable<Text>,
        /// Requester name for help reports.
        requester_name -> Nullable<Text>,
        /// Requester contact for help reports.
        requester_contact -> Nullable<Text>,
        /// Request narrative.
        description -> Text,
        /// Stored photo file name.
        photo_filename -> Nullable<Text>,
        /// Photo media type.
        photo_mime_type -> Nullable<Text>,
        /// Stored photo path.
        photo_path -> Nullable<Text>,
        /// Photo SHA-256 hex digest.
        photo_digest -> Nullable<Text>,
        /// Free-form status.
        status -> Text,
        /// Creation minute stamp.
        created_at -> Text,
    }
}

diesel::joinable!(work_orders -> sections (section_id));
diesel::joinable!(attachments -> work_orders (work_order_id));

diesel::allow_tables_to_appear_in_same_query!(
    sections,
    technicians,
    components,
    work_orders,
    attachments,
    intake_requests,
);
