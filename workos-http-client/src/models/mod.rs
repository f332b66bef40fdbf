pub mod api_error_body;
pub use self::api_error_body::ApiErrorBody;
pub mod directory;
pub use self::directory::{Directory, DirectoryState};
pub mod directory_group;
pub use self::directory_group::DirectoryGroup;
pub mod directory_user;
pub use self::directory_user::{DirectoryUser, DirectoryUserEmail, DirectoryUserState};
pub mod list;
pub use self::list::{List, ListMetadata};
pub mod profile;
pub use self::profile::{Profile, ProfileAndToken};
