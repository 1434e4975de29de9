pub mod change_time_entry_status;
pub mod create_time_entry;
pub mod delete_time_entry;
pub mod get_time_entry;
pub mod list_time_entries;
pub mod update_time_entry;

pub use change_time_entry_status::{ChangeTimeEntryStatusCommand, ChangeTimeEntryStatusUseCase};
pub use create_time_entry::{CreateTimeEntryCommand, CreateTimeEntryUseCase, EntryTiming};
pub use delete_time_entry::{DeleteTimeEntryCommand, DeleteTimeEntryUseCase};
pub use get_time_entry::{GetTimeEntryCommand, GetTimeEntryUseCase, TimeEntryDto};
pub use list_time_entries::{
  ListTimeEntriesCommand, ListTimeEntriesResponse, ListTimeEntriesUseCase, TimeEntryListItemDto,
};
pub use update_time_entry::{UpdateTimeEntryCommand, UpdateTimeEntryUseCase};
