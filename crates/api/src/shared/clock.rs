use chrono::{DateTime, NaiveDateTime, Utc};
use mediconnect_infra::MediconnectContext;

/// A timestamp in millis as clinic-local wall clock time.
pub fn local_datetime(ctx: &MediconnectContext, millis: i64) -> NaiveDateTime {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .with_timezone(&ctx.config.clinic_timezone)
        .naive_local()
}

/// The current clinic-local wall clock time, read through the context's
/// mockable time source.
pub fn local_now(ctx: &MediconnectContext) -> NaiveDateTime {
    local_datetime(ctx, ctx.sys.get_timestamp_millis())
}
