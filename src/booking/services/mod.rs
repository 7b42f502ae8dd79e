//! Orchestration services for room booking.

mod allocation;
mod notify;
mod requests;
mod room;

pub use allocation::{AllocationService, AllocationServiceError, AllocationServiceResult};
pub use requests::{
    CreateAllocationRequest, ListAllocationsRequest, RoomRequest, UpdateAllocationRequest,
};
pub use room::{RoomService, RoomServiceError, RoomServiceResult};
