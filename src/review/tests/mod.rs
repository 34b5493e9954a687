//! Unit tests for the review context.


use crate::identity::UserId;
use crate::review::domain::{Review, ReviewData, ReviewId};
use crate::task::domain::TaskId;
use chrono::DateTime;

fn review(id: u64, task: u64, stars: u8) -> Review {
    Review::from(ReviewData {
        id: ReviewId::new(id),
        task: TaskId::new(task),
        employer: UserId::new(100),
        freelancer: UserId::new(7),
        rating: stars,
        comment: "Delivered on time".to_owned(),
        created_at: DateTime::from_timestamp(1_735_689_600, 0).unwrap_or_default(),
    })
}
