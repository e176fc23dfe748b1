mod respond_invitation;

pub use respond_invitation::RespondInvitationUseCase;
