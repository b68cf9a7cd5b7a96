//! Diesel schema for agent task persistence.

diesel::table! {
    /// Agent task records.
    agent_tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Insertion sequence used for creation-order listings.
        seq -> Int8,
        /// Task kind.
        #[max_length = 20]
        kind -> Varchar,
        /// Pipeline under diagnosis.
        #[max_length = 255]
        pipeline_id -> Varchar,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Result of the latest finished run.
        result -> Nullable<Jsonb>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only action trail.
    agent_actions (id) {
        /// Action identifier, increasing with insertion order.
        id -> Int8,
        /// Owning task.
        task_id -> Uuid,
        /// Step label.
        #[max_length = 50]
        action_type -> Varchar,
        /// Free-text detail.
        payload -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(agent_actions -> agent_tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(agent_tasks, agent_actions);
