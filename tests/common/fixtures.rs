//! Test fixtures - reusable inputs and program sources.

/// Three columns, one data row
pub const ABC_INPUT: &str = "a,b,c\n1,2,3\n";

/// Grid the default program renders for `ABC_INPUT`
pub const ABC_GRID: &str = "\
+--------+---+---+---+
| _index | a | b | c |
+--------+---+---+---+
|      1 | 1 | 2 | 3 |
";

/// Typed columns with an empty quantity and a hex quantity
pub const ORDERS_INPUT: &str = "name,qty,price\napple,3,1.5\npear,,2\nfig,0x10,0.25\n";

/// Sums the quantity column without touching price
pub const SUM_QTY_SOURCE: &str = r#"#define COLUMN_LIST \
    COLUMN(_index, "_index", INT, HIDE(6)) \
    COLUMN(name, "name", STR, SHOW(4)) \
    COLUMN(qty, "qty", INT, SHOW(3)) \
    COLUMN(price, "price", DOUBLE, SHOW(5))

#include "livid.h"

int process(void)
{
    struct row row;
    struct row_valid valid;
    int64_t total = 0;
    int missing = 0;

    while (next()) {
        load_column(&row, &valid, COL_qty);
        if (valid.qty)
            total += row.qty;
        else
            missing++;
    }
    print("total=%lld missing=%d\n", (long long)total, missing);
    return 0;
}
"#;

/// Unterminated `COLUMN` entry; the builtin backend rejects it
pub const BROKEN_SOURCE: &str = "#define COLUMN_LIST \\\n    COLUMN(a, \"a\"\n";

/// Valid declaration, body a C compiler rejects
pub const UNDECLARED_IDENTIFIER_SOURCE: &str = r#"#define COLUMN_LIST \
    COLUMN(a, "a", STR, SHOW(1))

#include "livid.h"

int process(void)
{
    return no_such_variable;
}
"#;

/// Compiles, but exports no entry point
pub const NO_ENTRY_POINT_SOURCE: &str = r#"#define COLUMN_LIST \
    COLUMN(a, "a", STR, SHOW(1))

#include "livid.h"

int not_process(void)
{
    return 0;
}
"#;

/// Returns a nonzero status after printing the row count
pub fn exit_status_source(status: i32) -> String {
    format!(
        r#"#define COLUMN_LIST \
    COLUMN(a, "a", STR, SHOW(1))

#include "livid.h"

int process(void)
{{
    int rows = 0;

    while (next())
        rows++;
    print("rows=%d\n", rows);
    return {};
}}
"#,
        status
    )
}
