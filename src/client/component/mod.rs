pub mod channel_panel;
pub mod log_pane;
pub mod member_lookup;
pub mod notice;
pub mod server_list;
pub mod session_controls;
pub mod status_bar;
pub mod token_panel;

pub use channel_panel::ChannelPanel;
pub use log_pane::LogPane;
pub use member_lookup::MemberLookup;
pub use notice::NoticeBanner;
pub use server_list::ServerList;
pub use session_controls::SessionControls;
pub use status_bar::StatusBar;
pub use token_panel::TokenPanel;
