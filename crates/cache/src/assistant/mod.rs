mod send_message;

pub use send_message::SendAssistantMessageUseCase;
