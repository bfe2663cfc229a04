pub mod upstream;
pub mod booking;
pub mod listing;

pub use upstream::CollaboratorClients;
pub use booking::AppointmentBookingService;
pub use listing::AppointmentListingService;
