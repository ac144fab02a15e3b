use chrono::NaiveDate;
use tracing::{debug, trace};

use super::context::{DateRange, Selection, SelectionContext, SelectionMode};
use super::effect::{Deferred, Effect};
use super::event::{Callback, Event};
use crate::calendar;
use crate::grid::{CalendarDay, MonthStep};

/// Pure selection reducer
///
/// Takes the current context, an event, the picker mode and the grid cursor
/// (used to decide which way an out-of-month click navigates). Returns the
/// next context and the effects to run. Nothing here touches the grid or
/// calls a callback; the runtime executes the returned `Effect`.
pub fn reduce(
    context: SelectionContext,
    event: Event,
    mode: SelectionMode,
    cursor: NaiveDate,
) -> (SelectionContext, Effect) {
    trace!("REDUCER: {:?} in {:?} mode, state {:?}", event, mode, context.state());

    match mode {
        SelectionMode::Single => reduce_single(context, event),
        SelectionMode::Range => reduce_range(context, event, cursor),
    }
}

fn reduce_single(context: SelectionContext, event: Event) -> (SelectionContext, Effect) {
    match event {
        Event::Click(day, on_committed) => {
            debug!("REDUCER: Single date committed {}", day.key);
            let selection = Selection::Single(day.date);
            let new_context = SelectionContext {
                range_start: Some(day),
                range_end: None,
                done: false,
            };
            (
                new_context,
                Effect::Batch(vec![
                    Effect::Deferred(Deferred::Notify(selection)),
                    Effect::Deferred(Deferred::Callback(on_committed)),
                ]),
            )
        }
        Event::HoverEnter(_) => (context, Effect::None),
    }
}

fn reduce_range(
    context: SelectionContext,
    event: Event,
    cursor: NaiveDate,
) -> (SelectionContext, Effect) {
    match event {
        Event::Click(day, on_committed) => handle_click(context, day, on_committed, cursor),
        Event::HoverEnter(day) => handle_hover(context, day),
    }
}

fn handle_click(
    context: SelectionContext,
    day: CalendarDay,
    on_committed: Callback,
    cursor: NaiveDate,
) -> (SelectionContext, Effect) {
    if !day.is_current_month {
        return (context, navigate_towards(day.date, cursor));
    }

    let start = match (context.range_start, context.done) {
        (Some(start), false) => start,
        _ => {
            debug!("REDUCER: Range started at {}", day.key);
            let new_context = SelectionContext {
                range_start: Some(day),
                range_end: None,
                done: false,
            };
            return (new_context, Effect::None);
        }
    };

    // Earlier click while picking moves the start; the hover preview is dropped
    if calendar::is_before(day.date, start.date) {
        debug!("REDUCER: Range re-anchored {} -> {}", start.key, day.key);
        let new_context = SelectionContext {
            range_start: Some(day),
            range_end: None,
            done: false,
        };
        return (new_context, Effect::None);
    }

    debug!("REDUCER: Range committed {}..{}", start.key, day.key);
    let range = DateRange {
        start: start.date,
        end: day.date,
    };
    debug_assert!(range.start <= range.end);

    let new_context = SelectionContext {
        range_start: Some(start),
        range_end: Some(day),
        done: true,
    };
    (
        new_context,
        Effect::Batch(vec![
            Effect::Deferred(Deferred::Callback(on_committed)),
            Effect::Deferred(Deferred::Notify(Selection::Range(range))),
        ]),
    )
}

fn handle_hover(context: SelectionContext, day: CalendarDay) -> (SelectionContext, Effect) {
    let extends = match (&context.range_start, context.done) {
        (Some(start), false) => !calendar::is_before(day.date, start.date),
        _ => false,
    };

    if !extends {
        return (context, Effect::None);
    }

    trace!("REDUCER: Preview end at {}", day.key);
    let new_context = SelectionContext {
        range_end: Some(day),
        done: false,
        ..context
    };
    (new_context, Effect::None)
}

/// Navigation request for a click outside the displayed month
fn navigate_towards(date: NaiveDate, cursor: NaiveDate) -> Effect {
    if calendar::is_before(date, calendar::start_of_month(cursor)) {
        debug!("REDUCER: Out-of-month click on {} - previous month", date);
        Effect::Navigate(MonthStep::Previous)
    } else if calendar::is_after(date, calendar::end_of_month(cursor)) {
        debug!("REDUCER: Out-of-month click on {} - next month", date);
        Effect::Navigate(MonthStep::Next)
    } else {
        Effect::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::context::SelectionState;
    use crate::testing::{date, day, noop, outside_day};

    fn cursor() -> NaiveDate {
        date(2024, 1, 20)
    }

    fn click(context: SelectionContext, target: CalendarDay) -> (SelectionContext, Effect) {
        reduce(context, Event::Click(target, noop()), SelectionMode::Range, cursor())
    }

    fn hover(context: SelectionContext, target: CalendarDay) -> (SelectionContext, Effect) {
        reduce(context, Event::HoverEnter(target), SelectionMode::Range, cursor())
    }

    fn picking_from(start: CalendarDay) -> SelectionContext {
        SelectionContext {
            range_start: Some(start),
            range_end: None,
            done: false,
        }
    }

    fn notified(effect: Effect) -> Vec<Selection> {
        effect
            .into_vec()
            .into_iter()
            .filter_map(|e| match e {
                Effect::Deferred(Deferred::Notify(selection)) => Some(selection),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_first_click_starts_picking() {
        let (ctx, effect) = click(SelectionContext::default(), day(2024, 1, 10));

        assert_eq!(ctx.state(), SelectionState::Picking);
        assert_eq!(ctx.range_start, Some(day(2024, 1, 10)));
        assert!(ctx.range_end.is_none());
        assert!(matches!(effect, Effect::None));
    }

    #[test]
    fn test_click_before_start_re_anchors() {
        let (ctx, effect) = click(picking_from(day(2024, 1, 10)), day(2024, 1, 5));

        assert_eq!(ctx.range_start, Some(day(2024, 1, 5)));
        assert!(!ctx.done);
        assert_eq!(ctx.state(), SelectionState::Picking);
        assert!(notified(effect).is_empty());
    }

    #[test]
    fn test_click_after_start_commits_and_notifies_once() {
        let (ctx, effect) = click(picking_from(day(2024, 1, 10)), day(2024, 1, 15));

        assert_eq!(ctx.range_start, Some(day(2024, 1, 10)));
        assert_eq!(ctx.range_end, Some(day(2024, 1, 15)));
        assert!(ctx.done);

        let effects = effect.into_vec();
        assert_eq!(effects.len(), 2);
        assert!(matches!(effects[0], Effect::Deferred(Deferred::Callback(_))));
        match &effects[1] {
            Effect::Deferred(Deferred::Notify(Selection::Range(range))) => {
                assert_eq!(range.start, date(2024, 1, 10));
                assert_eq!(range.end, date(2024, 1, 15));
            }
            other => panic!("Expected range notification, got {:?}", other),
        }
    }

    #[test]
    fn test_same_day_twice_commits_single_day_range() {
        let (ctx, _) = click(SelectionContext::default(), day(2024, 1, 10));
        let (ctx, effect) = click(ctx, day(2024, 1, 10));

        assert!(ctx.done);
        assert_eq!(ctx.range_start, ctx.range_end);
        assert_eq!(
            notified(effect),
            vec![Selection::Range(DateRange {
                start: date(2024, 1, 10),
                end: date(2024, 1, 10),
            })]
        );
    }

    #[test]
    fn test_click_after_commit_starts_new_range() {
        let (ctx, _) = click(picking_from(day(2024, 1, 10)), day(2024, 1, 15));
        let (ctx, effect) = click(ctx, day(2024, 1, 3));

        assert_eq!(ctx.state(), SelectionState::Picking);
        assert_eq!(ctx.range_start, Some(day(2024, 1, 3)));
        assert!(ctx.range_end.is_none());
        assert!(matches!(effect, Effect::None));
    }

    #[test]
    fn test_hover_before_start_is_ignored() {
        let start = picking_from(day(2024, 1, 10));
        let (ctx, effect) = hover(start.clone(), day(2024, 1, 5));

        assert_eq!(ctx, start);
        assert!(ctx.range_end.is_none());
        assert!(matches!(effect, Effect::None));
    }

    #[test]
    fn test_hover_after_start_previews_without_commit() {
        let (ctx, effect) = hover(picking_from(day(2024, 1, 10)), day(2024, 1, 12));

        assert_eq!(ctx.range_end, Some(day(2024, 1, 12)));
        assert!(!ctx.done);
        assert_eq!(ctx.state(), SelectionState::Picking);
        assert!(matches!(effect, Effect::None));
    }

    #[test]
    fn test_hover_ignored_when_empty_or_committed() {
        let (ctx, _) = hover(SelectionContext::default(), day(2024, 1, 12));
        assert_eq!(ctx, SelectionContext::default());

        let (committed, _) = click(picking_from(day(2024, 1, 10)), day(2024, 1, 15));
        let (ctx, _) = hover(committed.clone(), day(2024, 1, 20));
        assert_eq!(ctx, committed);
    }

    #[test]
    fn test_out_of_month_click_navigates_without_selecting() {
        let start = picking_from(day(2024, 1, 10));

        let (ctx, effect) = click(start.clone(), outside_day(2024, 2, 2));
        assert_eq!(ctx, start);
        assert!(matches!(effect, Effect::Navigate(MonthStep::Next)));

        let (ctx, effect) = click(start.clone(), outside_day(2023, 12, 30));
        assert_eq!(ctx, start);
        assert!(matches!(effect, Effect::Navigate(MonthStep::Previous)));
    }

    #[test]
    fn test_single_mode_click_commits_immediately() {
        let (ctx, effect) = reduce(
            SelectionContext::default(),
            Event::Click(day(2024, 1, 10), noop()),
            SelectionMode::Single,
            cursor(),
        );

        assert_eq!(ctx.range_start, Some(day(2024, 1, 10)));
        assert!(ctx.range_end.is_none());
        assert!(!ctx.done);

        let effects = effect.into_vec();
        assert_eq!(effects.len(), 2);
        assert!(matches!(
            effects[0],
            Effect::Deferred(Deferred::Notify(Selection::Single(d))) if d == date(2024, 1, 10)
        ));
        assert!(matches!(effects[1], Effect::Deferred(Deferred::Callback(_))));
    }

    #[test]
    fn test_single_mode_does_not_accumulate() {
        let mut ctx = SelectionContext::default();
        for d in [5, 20, 3] {
            let (next, effect) = reduce(
                ctx,
                Event::Click(day(2024, 1, d), noop()),
                SelectionMode::Single,
                cursor(),
            );
            assert_eq!(notified(effect), vec![Selection::Single(date(2024, 1, d))]);
            ctx = next;
        }
        assert_eq!(ctx.range_start, Some(day(2024, 1, 3)));
    }

    #[test]
    fn test_single_mode_ignores_hover() {
        let start = SelectionContext {
            range_start: Some(day(2024, 1, 10)),
            ..Default::default()
        };
        let (ctx, effect) = reduce(
            start.clone(),
            Event::HoverEnter(day(2024, 1, 12)),
            SelectionMode::Single,
            cursor(),
        );
        assert_eq!(ctx, start);
        assert!(matches!(effect, Effect::None));
    }

    #[test]
    fn test_no_click_order_produces_inverted_range() {
        // Every ordered triple of clicks within January, hovering between each
        let days: Vec<u32> = (1..=31).step_by(3).collect();
        for &a in &days {
            for &b in &days {
                for &c in &days {
                    let mut ctx = SelectionContext::default();
                    for d in [a, b, c] {
                        let (next, _) = hover(ctx, day(2024, 1, d));
                        let (next, effect) = click(next, day(2024, 1, d));
                        for selection in notified(effect) {
                            match selection {
                                Selection::Range(range) => assert!(range.start <= range.end),
                                Selection::Single(_) => panic!("Range mode notified a single date"),
                            }
                        }
                        ctx = next;
                        if ctx.done {
                            let start = ctx.range_start.as_ref().unwrap().date;
                            let end = ctx.range_end.as_ref().unwrap().date;
                            assert!(start <= end, "{a} {b} {c}: {start} > {end}");
                        }
                        if let (Some(start), Some(end)) = (&ctx.range_start, &ctx.range_end) {
                            assert!(start.date <= end.date, "{a} {b} {c}: preview inverted");
                        }
                    }
                }
            }
        }
    }
}
