//! Diesel schema definitions.

diesel::table! {
    teachers (id) {
        id -> Integer,
        name -> Text,
    }
}

diesel::table! {
    students (id) {
        id -> Integer,
        lrn -> Text,
        name -> Text,
        section -> Nullable<Text>,
        teacher_id -> Nullable<Integer>,
    }
}

diesel::table! {
    guardians (id) {
        id -> Integer,
        name -> Text,
        student_id -> Nullable<Integer>,
        student_name -> Text,
        user_id -> Nullable<Integer>,
        relationship -> Nullable<Text>,
    }
}

diesel::table! {
    device_registrations (id) {
        id -> Integer,
        token -> Text,
        owner_id -> Nullable<Integer>,
        platform -> Nullable<Text>,
        label -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::joinable!(students -> teachers (teacher_id));
diesel::joinable!(guardians -> students (student_id));

diesel::allow_tables_to_appear_in_same_query!(teachers, students, guardians, device_registrations,);
