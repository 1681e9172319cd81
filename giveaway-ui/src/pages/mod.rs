mod giveaway;

pub use giveaway::{DemoGiveawayPage, LiveGiveawayPage};
