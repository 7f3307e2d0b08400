// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel table definitions mirroring the embedded migrations.

diesel::table! {
    users (user_id) {
        user_id -> BigInt,
        email -> Text,
        name -> Nullable<Text>,
        created_at -> Text,
    }
}

diesel::table! {
    events (event_id) {
        event_id -> BigInt,
        slug -> Text,
        title -> Text,
        description -> Nullable<Text>,
        location -> Nullable<Text>,
        event_on -> Nullable<Text>,
        owner_id -> BigInt,
        is_secret_santa -> Integer,
        is_no_spoil -> Integer,
        is_anon_reservations -> Integer,
        is_second_hand_ok -> Integer,
        is_handmade_ok -> Integer,
        budget_cap_cents -> Nullable<BigInt>,
        created_at -> Text,
    }
}

diesel::table! {
    event_members (membership_id) {
        membership_id -> BigInt,
        event_id -> BigInt,
        user_id -> BigInt,
        role -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    gift_lists (list_id) {
        list_id -> BigInt,
        event_id -> BigInt,
        owner_id -> BigInt,
        title -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    gift_items (item_id) {
        item_id -> BigInt,
        list_id -> BigInt,
        title -> Text,
        url -> Nullable<Text>,
        note -> Nullable<Text>,
        price_cents -> Nullable<BigInt>,
        created_at -> Text,
    }
}

diesel::table! {
    reservations (reservation_id) {
        reservation_id -> BigInt,
        item_id -> BigInt,
        by_user_id -> BigInt,
        status -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    assignments (assignment_id) {
        assignment_id -> BigInt,
        event_id -> BigInt,
        giver_id -> BigInt,
        receiver_id -> BigInt,
    }
}

diesel::table! {
    sessions (session_id) {
        session_id -> BigInt,
        session_token -> Text,
        user_id -> BigInt,
        created_at -> Text,
        last_activity_at -> Text,
        expires_at -> Text,
    }
}

diesel::table! {
    login_tokens (token_id) {
        token_id -> BigInt,
        token -> Text,
        email -> Text,
        created_at -> Text,
        expires_at -> Text,
        consumed -> Integer,
    }
}

diesel::table! {
    rate_limit_hits (hit_id) {
        hit_id -> BigInt,
        key -> Text,
        ts -> Text,
    }
}

diesel::joinable!(event_members -> events (event_id));
diesel::joinable!(event_members -> users (user_id));
diesel::joinable!(gift_lists -> events (event_id));
diesel::joinable!(gift_lists -> users (owner_id));
diesel::joinable!(gift_items -> gift_lists (list_id));
diesel::joinable!(reservations -> gift_items (item_id));
diesel::joinable!(reservations -> users (by_user_id));
diesel::joinable!(assignments -> events (event_id));
diesel::joinable!(sessions -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    events,
    event_members,
    gift_lists,
    gift_items,
    reservations,
    assignments,
    sessions,
    login_tokens,
    rate_limit_hits,
);
