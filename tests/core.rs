use std::cell::RefCell;
use std::rc::Rc;

use taskpad::db::{KeyValueStore, MemoryKv};
use taskpad::edit::EditState;
use taskpad::models::{Priority, Task};
use taskpad::persistence::{self, TASKS_KEY};
use taskpad::session::{Key, Session};
use taskpad::store::TaskStore;
use taskpad::view::{self, Counts, Filter};

// ─── helpers ───────────────────────────────────────────────────────

fn store_with(texts: &[&str]) -> TaskStore {
    let mut store = TaskStore::new();
    for text in texts {
        store.add(text, Priority::Medium).expect("add");
    }
    store
}

fn ids(tasks: &[&Task]) -> Vec<u64> {
    tasks.iter().map(|t| t.id).collect()
}

fn kv_with(blob: &str) -> MemoryKv {
    let mut kv = MemoryKv::new();
    kv.set(TASKS_KEY, blob).unwrap();
    kv
}

// ─── 1. task store ─────────────────────────────────────────────────

#[test]
fn test_add_appends_pending_task() {
    let mut store = TaskStore::new();
    let id = store.add("Buy milk", Priority::High).unwrap();
    assert_eq!(store.len(), 1);
    let t = store.get(id).unwrap();
    assert_eq!(t.text, "Buy milk");
    assert_eq!(t.priority, Priority::High);
    assert!(!t.completed);
    assert_eq!(t.completed_at, None);
}

#[test]
fn test_add_rejects_blank_text() {
    let mut store = store_with(&["one"]);
    assert_eq!(store.add("", Priority::Low), None);
    assert_eq!(store.add("   \t ", Priority::Low), None);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_add_stores_text_as_given() {
    let mut store = TaskStore::new();
    let id = store.add("  Buy milk  ", Priority::Medium).unwrap();
    assert_eq!(store.get(id).unwrap().text, "  Buy milk  ");
}

#[test]
fn test_ids_stay_unique_past_u64_max() {
    let kv = kv_with(r#"[{"id": 0, "text": "a"}, {"id": 18446744073709551615, "text": "b"}]"#);
    let mut store = TaskStore::from_tasks(persistence::load(&kv));
    let first = store.add("c", Priority::Medium).unwrap();
    let second = store.add("d", Priority::Medium).unwrap();

    assert_eq!((first, second), (1, 2));
    let mut all: Vec<u64> = store.tasks().iter().map(|t| t.id).collect();
    all.sort_unstable();
    all.dedup();
    assert_eq!(all.len(), 4);
}

#[test]
fn test_ids_are_unique_and_increasing() {
    let mut store = store_with(&["a", "b", "c"]);
    let first: Vec<u64> = store.tasks().iter().map(|t| t.id).collect();
    assert!(first.windows(2).all(|w| w[0] < w[1]));

    // a deleted id is never handed out again in the same store
    let last = *first.last().unwrap();
    store.delete_task(last);
    let id = store.add("d", Priority::Medium).unwrap();
    assert!(id > last);
}

#[test]
fn test_ids_continue_after_loaded_tasks() {
    let store = TaskStore::from_tasks(vec![Task::new(1700000000000, "legacy", Priority::Low)]);
    let mut store = store;
    let id = store.add("new", Priority::Medium).unwrap();
    assert_eq!(id, 1700000000001);
}

#[test]
fn test_toggle_sets_and_clears_timestamp() {
    let mut store = store_with(&["a"]);
    let id = store.tasks()[0].id;

    assert!(store.toggle_complete(id));
    let t = store.get(id).unwrap();
    assert!(t.completed);
    assert!(t.completed_at.is_some());

    assert!(store.toggle_complete(id));
    let t = store.get(id).unwrap();
    assert!(!t.completed);
    assert_eq!(t.completed_at, None);
}

#[test]
fn test_toggle_unknown_id_is_noop() {
    let mut store = store_with(&["a"]);
    let before = store.tasks().to_vec();
    assert!(!store.toggle_complete(999));
    assert_eq!(store.tasks(), &before[..]);
}

#[test]
fn test_delete_twice() {
    let mut store = store_with(&["a", "b"]);
    let id = store.tasks()[0].id;
    assert!(store.delete_task(id));
    assert_eq!(store.len(), 1);
    assert!(!store.delete_task(id));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_edit_text_is_verbatim() {
    let mut store = store_with(&["a"]);
    let id = store.tasks()[0].id;

    assert!(store.edit_text(id, "  padded  "));
    assert_eq!(store.get(id).unwrap().text, "  padded  ");

    // Unlike add, edit accepts empty text.
    assert!(store.edit_text(id, ""));
    assert_eq!(store.get(id).unwrap().text, "");

    assert!(!store.edit_text(42, "nope"));
}

#[test]
fn test_clear_completed_keeps_pending_in_order() {
    let mut store = store_with(&["a", "b", "c", "d"]);
    let all: Vec<u64> = store.tasks().iter().map(|t| t.id).collect();
    store.toggle_complete(all[1]);
    store.toggle_complete(all[3]);
    let pending_before: Vec<Task> = store.tasks().iter().filter(|t| !t.completed).cloned().collect();

    assert_eq!(store.clear_completed(), 2);
    assert_eq!(store.tasks(), &pending_before[..]);
    assert_eq!(store.clear_completed(), 0);
}

#[test]
fn test_mark_all_completed_then_pending() {
    let mut store = store_with(&["a", "b", "c"]);
    let first = store.tasks()[0].id;
    store.toggle_complete(first);

    assert!(store.mark_all_completed());
    assert!(store.tasks().iter().all(|t| t.completed && t.completed_at.is_some()));

    assert!(store.mark_all_pending());
    assert!(store.tasks().iter().all(|t| !t.completed && t.completed_at.is_none()));
}

#[test]
fn test_bulk_on_empty_store_is_noop() {
    let mut store = TaskStore::new();
    assert!(!store.mark_all_completed());
    assert!(!store.mark_all_pending());
    assert_eq!(store.clear_completed(), 0);
}

#[test]
fn test_observers_see_every_change_and_no_noops() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut store = TaskStore::new();
    let sink = Rc::clone(&seen);
    store.subscribe(move |tasks| sink.borrow_mut().push(tasks.len()));

    let id = store.add("a", Priority::Medium).unwrap();
    store.add("  ", Priority::Medium);
    store.toggle_complete(id);
    store.toggle_complete(404);
    store.add("b", Priority::Low);
    store.clear_completed();
    store.delete_task(404);

    assert_eq!(*seen.borrow(), vec![1, 1, 2, 1]);
}

// ─── 2. edit-in-place ──────────────────────────────────────────────

#[test]
fn test_edit_save_commits_scratch() {
    let mut store = store_with(&["draft"]);
    let task = store.tasks()[0].clone();
    let mut edit = EditState::Idle;

    edit.start(&task);
    assert_eq!(edit.scratch(), Some("draft"));
    assert!(edit.set_scratch("final"));
    assert!(edit.save(task.id, &mut store));
    assert_eq!(edit, EditState::Idle);
    assert_eq!(store.get(task.id).unwrap().text, "final");
}

#[test]
fn test_edit_cancel_leaves_store_untouched() {
    let mut store = store_with(&["keep"]);
    let task = store.tasks()[0].clone();
    let mut edit = EditState::Idle;

    edit.start(&task);
    edit.set_scratch("discard me");
    edit.cancel();
    assert_eq!(edit, EditState::Idle);
    assert_eq!(store.get(task.id).unwrap().text, "keep");
    assert!(!edit.save(task.id, &mut store));
}

#[test]
fn test_starting_new_edit_replaces_previous() {
    let store = store_with(&["one", "two"]);
    let (a, b) = (store.tasks()[0].clone(), store.tasks()[1].clone());
    let mut edit = EditState::Idle;

    edit.start(&a);
    edit.set_scratch("changed one");
    edit.start(&b);
    assert_eq!(edit, EditState::Editing { id: b.id, scratch: "two".into() });
}

#[test]
fn test_scratch_while_idle_is_refused() {
    let mut edit = EditState::Idle;
    assert!(!edit.set_scratch("x"));
    assert_eq!(edit.editing_id(), None);
}

// ─── 3. view projection ────────────────────────────────────────────

#[test]
fn test_filters_partition_collection() {
    let mut store = store_with(&["a", "b", "c", "d", "e"]);
    let all_ids: Vec<u64> = store.tasks().iter().map(|t| t.id).collect();
    store.toggle_complete(all_ids[0]);
    store.toggle_complete(all_ids[3]);

    let completed = ids(&view::project(store.tasks(), Filter::Completed, ""));
    let pending = ids(&view::project(store.tasks(), Filter::Pending, ""));
    let all = ids(&view::project(store.tasks(), Filter::All, ""));

    assert_eq!(completed, vec![all_ids[0], all_ids[3]]);
    assert_eq!(pending, vec![all_ids[1], all_ids[2], all_ids[4]]);
    assert!(completed.iter().all(|id| !pending.contains(id)));
    let mut union = [completed, pending].concat();
    union.sort_unstable();
    assert_eq!(union, all);
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let store = store_with(&["Buy Milk", "call bank", "milkshake", "Other"]);
    let hits: Vec<&str> = view::project(store.tasks(), Filter::All, "MILK")
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(hits, vec!["Buy Milk", "milkshake"]);
    assert_eq!(view::project(store.tasks(), Filter::All, "").len(), 4);
    assert!(view::project(store.tasks(), Filter::All, "zzz").is_empty());
}

#[test]
fn test_search_applies_after_filter() {
    let mut store = store_with(&["milk", "more milk"]);
    let first = store.tasks()[0].id;
    store.toggle_complete(first);
    let hits = view::project(store.tasks(), Filter::Pending, "milk");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text, "more milk");
}

#[test]
fn test_counts_ignore_filter() {
    let mut store = store_with(&["a", "b", "c"]);
    let id = store.tasks()[2].id;
    store.toggle_complete(id);
    assert_eq!(
        Counts::of(store.tasks()),
        Counts { total: 3, completed: 1, pending: 2 }
    );
    assert_eq!(Counts::of(&[]), Counts::default());
}

#[test]
fn test_scenario_buy_milk() {
    let mut store = TaskStore::new();
    let milk = store.add("Buy milk", Priority::High).unwrap();
    store.add("Call bank", Priority::Low).unwrap();
    store.toggle_complete(milk);

    assert_eq!(
        Counts::of(store.tasks()),
        Counts { total: 2, completed: 1, pending: 1 }
    );
    let done = view::project(store.tasks(), Filter::Completed, "");
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].text, "Buy milk");
    assert_eq!(done[0].priority, Priority::High);
    assert!(done[0].completed);
}

// ─── 4. persistence bridge ─────────────────────────────────────────

#[test]
fn test_save_then_load_round_trip() {
    let mut store = store_with(&["a", "b"]);
    let id = store.tasks()[1].id;
    store.toggle_complete(id);

    let mut kv = MemoryKv::new();
    persistence::save(&mut kv, store.tasks()).unwrap();
    assert_eq!(persistence::load(&kv), store.tasks().to_vec());
}

#[test]
fn test_saved_layout_uses_camel_case_completed_at() {
    let mut kv = MemoryKv::new();
    let mut task = Task::new(7, "x", Priority::Low);
    task.completed_at = Some("1/2/2026, 3:04:05 PM".into());
    task.completed = true;
    persistence::save(&mut kv, &[task]).unwrap();

    let blob: serde_json::Value = serde_json::from_str(&kv.get(TASKS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(
        blob,
        serde_json::json!([{
            "id": 7, "text": "x", "completed": true, "priority": "Low",
            "completedAt": "1/2/2026, 3:04:05 PM"
        }])
    );
}

#[test]
fn test_load_defaults_legacy_fields() {
    let kv = kv_with(r#"[{"id": 1, "text": "old"}, {"id": 2, "text": "older", "completed": null, "priority": null}]"#);
    let tasks = persistence::load(&kv);
    assert_eq!(tasks.len(), 2);
    for t in &tasks {
        assert!(!t.completed);
        assert_eq!(t.priority, Priority::Medium);
        assert_eq!(t.completed_at, None);
    }
}

#[test]
fn test_load_missing_or_corrupt_is_empty() {
    assert!(persistence::load(&MemoryKv::new()).is_empty());
    assert!(persistence::load(&kv_with("null")).is_empty());
    assert!(persistence::load(&kv_with("{not json")).is_empty());
    assert!(persistence::load(&kv_with(r#"{"id": 1}"#)).is_empty());
}

#[test]
fn test_load_skips_unreadable_records() {
    let kv = kv_with(r#"[{"id": 1, "text": "ok"}, {"text": "no id"}, 5, {"id": 3, "text": "also ok", "priority": "High"}]"#);
    let tasks = persistence::load(&kv);
    let texts: Vec<&str> = tasks.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["ok", "also ok"]);
    assert_eq!(tasks[1].priority, Priority::High);
}

#[test]
fn test_load_renumbers_duplicate_ids() {
    let kv = kv_with(r#"[{"id": 5, "text": "a"}, {"id": 5, "text": "b"}, {"id": 2, "text": "c"}]"#);
    let tasks = persistence::load(&kv);
    let loaded: Vec<u64> = tasks.iter().map(|t| t.id).collect();
    assert_eq!(loaded, vec![5, 6, 2]);
}

#[test]
fn test_load_renumbers_duplicate_max_ids() {
    let kv = kv_with(
        r#"[{"id": 18446744073709551615, "text": "a"}, {"id": 18446744073709551615, "text": "b"}, {"id": 0, "text": "c"}]"#,
    );
    let tasks = persistence::load(&kv);
    let loaded: Vec<u64> = tasks.iter().map(|t| t.id).collect();
    assert_eq!(loaded, vec![u64::MAX, 0, 1]);
}

#[test]
fn test_load_priority_ignores_case() {
    let kv = kv_with(
        r#"[{"id": 1, "text": "a", "priority": "high"}, {"id": 2, "text": "b", "priority": "LOW"}, {"id": 3, "text": "c", "priority": "Urgent"}]"#,
    );
    let priorities: Vec<Priority> = persistence::load(&kv).iter().map(|t| t.priority).collect();
    assert_eq!(priorities, vec![Priority::High, Priority::Low, Priority::Medium]);
}

#[test]
fn test_autosave_mirrors_every_mutation() {
    let kv = Rc::new(RefCell::new(MemoryKv::new()));
    let mut store = TaskStore::from_tasks(persistence::load(&kv));
    store.subscribe(persistence::autosave(Rc::clone(&kv)));

    let id = store.add("persist me", Priority::High).unwrap();
    assert_eq!(persistence::load(&kv), store.tasks().to_vec());

    store.toggle_complete(id);
    assert!(persistence::load(&kv)[0].completed);

    store.delete_task(id);
    assert!(persistence::load(&kv).is_empty());
}

// ─── 5. session ────────────────────────────────────────────────────

#[test]
fn test_submit_resets_draft_and_priority() {
    let mut session = Session::new(TaskStore::new());
    session.set_draft("Walk dog");
    session.set_priority(Priority::Low);
    assert!(session.can_add());

    let id = session.key(Key::Enter).unwrap();
    assert_eq!(session.store().get(id).unwrap().priority, Priority::Low);
    assert_eq!(session.draft(), "");
    assert_eq!(session.priority(), Priority::Medium);
}

#[test]
fn test_blank_submit_keeps_draft_state() {
    let mut session = Session::new(TaskStore::new());
    session.set_draft("   ");
    session.set_priority(Priority::High);
    assert!(!session.can_add());
    assert_eq!(session.submit(), None);
    assert_eq!(session.priority(), Priority::High);
    assert!(session.store().is_empty());
}

#[test]
fn test_escape_clears_draft_but_not_edit() {
    let mut session = Session::new(store_with(&["a"]));
    let id = session.store().tasks()[0].id;
    session.start_edit(id);
    session.set_scratch("b");
    session.set_draft("half typed");

    assert_eq!(session.key(Key::Escape), None);
    assert_eq!(session.draft(), "");
    assert_eq!(session.edit().scratch(), Some("b"));
}

#[test]
fn test_bulk_enabled_follows_collection() {
    let mut session = Session::new(TaskStore::new());
    assert!(!session.bulk_enabled());
    session.set_draft("x");
    session.submit();
    assert!(session.bulk_enabled());
    assert!(!session.can_clear_completed());
    session.mark_all_completed();
    assert!(session.can_clear_completed());
}

#[test]
fn test_deleting_edited_task_drops_edit() {
    let mut session = Session::new(store_with(&["a", "b"]));
    let id = session.store().tasks()[0].id;
    session.start_edit(id);
    session.delete_task(id);
    assert_eq!(session.edit(), &EditState::Idle);
}

#[test]
fn test_session_visible_uses_filter_and_search() {
    let mut session = Session::new(store_with(&["Buy milk", "Call bank"]));
    let milk = session.store().tasks()[0].id;
    session.toggle_complete(milk);

    session.set_filter(Filter::Pending);
    assert_eq!(session.visible().len(), 1);
    session.set_filter(Filter::All);
    session.set_search("BANK");
    assert_eq!(session.visible()[0].text, "Call bank");
    assert_eq!(session.counts().total, 2);
}
