//! The transactions table.

use maud::{Markup, html};

use crate::{
    html::{BUTTON_DELETE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    transaction::{Transaction, TransactionType},
};

const TABLE_CELL_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TABLE_CELL_RED_STYLE: &str = "text-red-600 dark:text-red-400";

fn amount_color_class(kind: TransactionType) -> &'static str {
    match kind {
        TransactionType::Income => TABLE_CELL_GREEN_STYLE,
        TransactionType::Expense => TABLE_CELL_RED_STYLE,
    }
}

/// Renders one row per transaction, in the order given.
///
/// Each row ends with a delete button whose `data-id` attribute carries the
/// transaction's ID. The button is disabled and its title names the
/// `dashboard delete` command. A missing note is shown as an empty cell.
///
/// # Arguments
/// * `transactions` - The transactions as returned by the service
///
/// # Returns
/// Maud markup for a `table` with the ID `tx-table`.
pub fn transactions_table(transactions: &[Transaction]) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow" {
            table id="tx-table" class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                thead class=(TABLE_HEADER_STYLE) {
                    tr {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Note" }
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                    }
                }
                tbody {
                    @for transaction in transactions {
                        tr class=(TABLE_ROW_STYLE) data-id=(transaction.id) {
                            td class=(TABLE_CELL_STYLE) { (transaction.date) }
                            td class=(TABLE_CELL_STYLE) { (transaction.kind) }
                            td class=(TABLE_CELL_STYLE) { (transaction.category) }
                            td class={(TABLE_CELL_STYLE) " " (amount_color_class(transaction.kind))} {
                                (format_currency(transaction.amount))
                            }
                            td class=(TABLE_CELL_STYLE) {
                                (transaction.note.as_deref().unwrap_or(""))
                            }
                            td class=(TABLE_CELL_STYLE) {
                                button
                                    type="button"
                                    class=(BUTTON_DELETE_STYLE)
                                    data-action="delete"
                                    data-id=(transaction.id)
                                    title={ "Run `dashboard delete " (transaction.id) "`" }
                                    disabled
                                {
                                    "Delete"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
