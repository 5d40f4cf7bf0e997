//! Backend endpoint groups
//!
//! Each submodule adds one `impl ApiClient` block with its request and
//! response shapes. Every call is a single request with no retry.

pub mod auth;
pub mod budget;
pub mod itinerary;
pub mod speech;
pub mod text;

pub use auth::{AuthResponse, RegisterData};
pub use budget::{BudgetSummary, Expense, ExpenseCategory, ExtractedExpense, NewExpense};
pub use itinerary::{
    Activity, ApiResponse, DayItinerary, GenerateItineraryResponse, Itinerary,
    ItineraryGenerateRequest, ItinerarySummary, ItineraryUpdateRequest,
};
pub use speech::{AudioFormat, RecognizeOptions, SpeechRecognition};
pub use text::TripDraft;
