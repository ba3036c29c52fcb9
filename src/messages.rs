//! User-facing strings shared by the API and the client store.
//!
//! The portal is Arabic-only; every `error` field the server returns and
//! every message the client surfaces comes from this table.

pub const EVENTS_FETCH_FAILED: &str = "فشل في جلب الفعاليات";
pub const EVENT_CREATE_FAILED: &str = "فشل في إضافة الفعالية";
pub const EVENT_UPDATE_FAILED: &str = "فشل في تحديث الفعالية";
pub const EVENT_DELETE_FAILED: &str = "فشل في حذف الفعالية";
pub const EVENT_DELETED: &str = "تم حذف الفعالية";
pub const EVENT_NOT_FOUND: &str = "الفعالية غير موجودة";
pub const EVENT_FULL: &str = "اكتمل عدد المتطوعين لهذه الفعالية";
pub const EVENT_DELETE_PROMPT: &str = "هل أنت متأكد من حذف هذه الفعالية؟";

pub const TRAININGS_FETCH_FAILED: &str = "فشل في جلب التدريبات";
pub const TRAINING_CREATE_FAILED: &str = "فشل في إضافة التدريب";
pub const TRAINING_UPDATE_FAILED: &str = "فشل في تحديث التدريب";
pub const TRAINING_DELETE_FAILED: &str = "فشل في حذف التدريب";
pub const TRAINING_DELETED: &str = "تم حذف التدريب";
pub const TRAINING_NOT_FOUND: &str = "التدريب غير موجود";
pub const TRAINING_FULL: &str = "اكتمل عدد المشاركين في هذا التدريب";
pub const TRAINING_DELETE_PROMPT: &str = "هل أنت متأكد من حذف هذا التدريب؟";

pub const ENROLL_FAILED: &str = "فشل في التسجيل";
pub const OVER_CAPACITY: &str = "العدد الحالي يتجاوز الحد الأقصى";

pub const LOGIN_SUCCEEDED: &str = "تم تسجيل الدخول بنجاح";
pub const LOGIN_FAILED: &str = "البريد الإلكتروني أو كلمة المرور غير صحيحة";

pub const INVALID_PAYLOAD: &str = "بيانات غير صالحة";
pub const STORE_FAILED: &str = "فشل في حفظ البيانات";

pub const REQUIRED_FIELDS: &str = "يرجى ملء جميع الحقول المطلوبة";
pub const TRAINING_TITLE_REQUIRED: &str = "يرجى إدخال عنوان التدريب";
pub const TRAINING_DATE_REQUIRED: &str = "يرجى إدخال تاريخ التدريب";
pub const TRAINING_TIME_REQUIRED: &str = "يرجى إدخال وقت التدريب";
pub const TRAINING_LOCATION_REQUIRED: &str = "يرجى إدخال موقع التدريب";
pub const TRAINING_CAPACITY_REQUIRED: &str = "يرجى إدخال عدد المشاركين المطلوب";
pub const TRAINING_INSTRUCTOR_REQUIRED: &str = "يرجى إدخال اسم المدرب";
pub const TRAINING_DURATION_REQUIRED: &str = "يرجى إدخال مدة التدريب";
