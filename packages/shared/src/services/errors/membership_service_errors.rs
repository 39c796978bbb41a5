use std::fmt;

#[derive(Debug)]
pub enum MembershipServiceError {
    GameNotFound,
    /// The target user has no pending request on the game.
    RequestNotFound,
    ParticipantNotFound,
    /// The acting user is not the organizer of the game.
    Unauthorized,
    /// The acting user is the organizer or already a participant.
    AlreadyMember,
    /// Join requests are refused once a game is completed.
    GameCompleted,
    /// The participant set is at `max_players`; for approvals the target is
    /// left in the pending set.
    CapacityExceeded,
    /// The organizer cannot leave or be removed from their own game.
    OrganizerImmovable,
    /// The game changed under the caller; re-read and retry.
    Conflict,
    RepositoryError(String),
}

impl fmt::Display for MembershipServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MembershipServiceError::GameNotFound => write!(f, "Game not found"),
            MembershipServiceError::RequestNotFound => write!(f, "Join request not found"),
            MembershipServiceError::ParticipantNotFound => write!(f, "Participant not found"),
            MembershipServiceError::Unauthorized => {
                write!(f, "Only the organizer may perform this action")
            }
            MembershipServiceError::AlreadyMember => {
                write!(f, "User is already a member of this game")
            }
            MembershipServiceError::GameCompleted => write!(f, "Game has already completed"),
            MembershipServiceError::CapacityExceeded => write!(f, "Game is already full"),
            MembershipServiceError::OrganizerImmovable => {
                write!(f, "The organizer cannot be removed from their own game")
            }
            MembershipServiceError::Conflict => write!(f, "Game was modified concurrently"),
            MembershipServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for MembershipServiceError {}
