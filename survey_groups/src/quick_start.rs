/*!

# Quick start

This example assumes a survey collected with an online form and exported as a CSV
file, one line per respondent. The first column is the timestamp or the id of the
respondent, the other columns are the questions:

```text
Marca temporal,¿Qué edad tienes?,¿Reciclas?,¿Separas la basura?
2022/05/01 10:00,26 a 35 años,Sí,Sí
2022/05/01 10:05,18 a 25 años,Sí,No
2022/05/01 10:09,26 a 35 años,No,No
```

**Finding the identifiers** List the answers of each question:

```bash
surveytally -f encuesta.csv --list
```

**Tallying groups** Count the respondents who recycle, and among them those who also
sort their garbage:

```bash
surveytally -f encuesta.csv -g p2:r1,p3:r1
```

```text
p2:r1 = 2 (66.67% of 3)
- p2:r1,p3:r1 = 1 (50.00% of 2)
```

Several groups can be passed at once: `-g p1:r1 p2:r1,p3:r1`.

With `--verbose`, the question and the answer of the last identifier of each group are
printed as well.

The same tally is available from Rust:

```
use survey_groups::run_group_stats;

let questions = vec!["Age".to_string(), "Recycles".to_string(), "Sorts".to_string()];
let rows = vec![
    vec!["26 to 35".to_string(), "Yes".to_string(), "Yes".to_string()],
    vec!["18 to 25".to_string(), "Yes".to_string(), "No".to_string()],
    vec!["26 to 35".to_string(), "No".to_string(), "No".to_string()],
];
let res = run_group_stats(&questions, &rows, &["p2:r1,p3:r1"])?;
assert_eq!(res.metrics[0].count, 2);
assert_eq!(res.metrics[1].count, 1);
assert_eq!(format!("{:.2}", res.metrics[1].percentage), "50.00");
# Ok::<(), survey_groups::TallyErrors>(())
```

See the [manual](../manual/index.html) for all the options.

*/
