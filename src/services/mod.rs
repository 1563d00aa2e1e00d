pub mod poll;
pub mod voter;
pub mod votes;

pub use poll::PollService;
pub use voter::VoterService;
pub use votes::VotesService;
