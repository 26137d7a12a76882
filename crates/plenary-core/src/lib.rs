pub mod activity;
pub mod config;
pub mod entity;
pub mod language;
pub mod meeting;
pub mod member;
pub mod text;
pub mod topic;
pub mod vote;

pub use activity::Activity;
pub use config::ExtractConfig;
pub use entity::{Document, Entity, EntityRegistry, Question};
pub use language::{Choice, Language};
pub use meeting::{Meeting, MeetingInfo, Session, TimeOfDay};
pub use member::{Member, MemberResolver};
pub use topic::{Bilingual, MeetingTopic, TopicType};
pub use vote::{ElectronicAdvisoryVote, ElectronicGenericVote, GenericVote, LanguageGroupVote, Vote};
