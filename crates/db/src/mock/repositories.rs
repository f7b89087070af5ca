use chrono::{Duration, NaiveDate};
use mockall::mock;
use uuid::Uuid;

use crate::models::{
    DbCalendarEvent, DbCalendarEventWithCreator, DbClass, DbHoliday, DbHolidayWithCreator,
    DbSession, DbTimetableSlot, DbTimetableSlotWithFaculty, DbUser, NewTimetableSlot,
};

// Mock repositories for testing
mock! {
    pub UserRepo {
        pub async fn create_user(
            &self,
            name: &'static str,
            email: &'static str,
            password_hash: &'static str,
            role: &'static str,
            class_id: Option<&'static str>,
        ) -> eyre::Result<DbUser>;

        pub async fn get_user_by_email(
            &self,
            email: &'static str,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn get_user_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn list_faculty(&self) -> eyre::Result<Vec<DbUser>>;

        pub async fn missing_faculty_ids(
            &self,
            ids: Vec<Uuid>,
        ) -> eyre::Result<Vec<Uuid>>;

        pub async fn set_user_class(
            &self,
            user_id: Uuid,
            class_id: &'static str,
        ) -> eyre::Result<DbUser>;

        pub async fn verify_credentials(
            &self,
            email: &'static str,
            password: &'static str,
        ) -> eyre::Result<Option<DbUser>>;
    }
}

mock! {
    pub SessionRepo {
        pub async fn create_session(
            &self,
            user_id: Uuid,
            ttl: Duration,
        ) -> eyre::Result<DbSession>;

        pub async fn get_user_by_token(
            &self,
            token: Uuid,
        ) -> eyre::Result<Option<DbUser>>;
    }
}

mock! {
    pub ClassRepo {
        pub async fn create_class(
            &self,
            id: &'static str,
            name: &'static str,
            course: &'static str,
        ) -> eyre::Result<DbClass>;

        pub async fn get_class_by_id(
            &self,
            id: &'static str,
        ) -> eyre::Result<Option<DbClass>>;

        pub async fn list_classes(&self) -> eyre::Result<Vec<DbClass>>;

        pub async fn update_class_term(
            &self,
            id: &'static str,
            start_date: NaiveDate,
            end_date: NaiveDate,
            active_days: Vec<String>,
        ) -> eyre::Result<DbClass>;
    }
}

mock! {
    pub TimetableRepo {
        pub async fn replace_class_timetable(
            &self,
            class_id: &'static str,
            slots: Vec<NewTimetableSlot>,
        ) -> eyre::Result<Vec<DbTimetableSlot>>;

        pub async fn get_slots_by_class(
            &self,
            class_id: &'static str,
        ) -> eyre::Result<Vec<DbTimetableSlotWithFaculty>>;

        pub async fn get_slots_by_faculty(
            &self,
            faculty_id: Uuid,
        ) -> eyre::Result<Vec<DbTimetableSlotWithFaculty>>;
    }
}

mock! {
    pub CalendarRepo {
        pub async fn insert_holiday(
            &self,
            name: &'static str,
            date: NaiveDate,
            created_by: Uuid,
        ) -> eyre::Result<DbHoliday>;

        pub async fn list_holidays(&self) -> eyre::Result<Vec<DbHolidayWithCreator>>;

        pub async fn insert_event(
            &self,
            name: &'static str,
            date: NaiveDate,
            description: Option<&'static str>,
            created_by: Uuid,
        ) -> eyre::Result<DbCalendarEvent>;

        pub async fn list_events(&self) -> eyre::Result<Vec<DbCalendarEventWithCreator>>;
    }
}
