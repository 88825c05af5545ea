mod channel_dispatcher;

pub use channel_dispatcher::ChannelTaskDispatcher;
