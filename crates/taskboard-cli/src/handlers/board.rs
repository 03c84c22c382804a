use crate::output;
use serde_json::{json, Value};
use taskboard_domain::{BoardView, CardAction, CardView, ColumnView, TaskBoardOperations};

pub async fn handle<O: TaskBoardOperations>(ops: &O) -> anyhow::Result<()> {
    let tasks = ops.list_tasks().await?;
    let board = BoardView::from_tasks(&tasks);
    let counts = board.counts();

    let columns: Vec<Value> = board
        .columns()
        .iter()
        .map(|column| column_json(column, counts.get(column.status)))
        .collect();

    output::output_success(json!({
        "counts": counts,
        "total": counts.total(),
        "columns": columns,
    }));
    Ok(())
}

fn column_json(column: &ColumnView, count: usize) -> Value {
    json!({
        "status": column.status,
        "title": column.title(),
        "count": count,
        "empty_message": column.empty_message(),
        "cards": column.cards.iter().map(card_json).collect::<Vec<_>>(),
    })
}

fn card_json(card: &CardView) -> Value {
    json!({
        "id": card.id,
        "text": card.text,
        "indicators": card.indicators.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "actions": card.actions.iter().map(CardAction::label).collect::<Vec<_>>(),
    })
}
