pub mod academic;
pub mod attendance;
pub mod finance;
pub mod notification;
pub mod performance;
pub mod school;
pub mod student;
pub mod user;

pub use academic::{AcademicYear, Classroom, NewAcademicYear, NewClassroom, NewSubject, NewTerm, Subject, Term};
pub use attendance::{attendance_rate, AttendanceBulkRequest, AttendanceMark, AttendanceStatus};
pub use finance::{format_currency, FinanceStats, NewPayment, Payment};
pub use notification::{Notification, Severity};
pub use performance::{Assessment, GradeBulkRequest, GradeEntry, NewAssessment};
pub use school::{School, SchoolUpdate};
pub use student::Student;
pub use user::{LoginRequest, RegisterRequest, TokenResponse, User};
