/*!

This is the long-form manual for `survey_groups` and `surveytally`.

## Identifiers

Every answer of the survey gets an identifier `p<question>:r<answer>`:
- `<question>` is the position of the question in the header, starting at 1 with the
first question column (the respondent column is not a question);
- `<answer>` is the position of the answer among all the distinct answers of this
question, in the order in which they first appear in the file, starting at 1.

Cells with several answers separated by `;` (checkboxes) register each answer
separately. Empty cells do not register anything.

Since the positions only depend on the content of the file, the identifiers are the
same every time the same file is processed. They will change if the answers of
the file change order, so list them again after updating the data:

```bash
surveytally -f resources/encuesta.csv --list
```

```text
¿Qué edad tienes?
p1:r1 -> 26 a 35 años
p1:r2 -> 18 a 25 años

¿Reciclas?
p2:r1 -> Sí
p2:r2 -> No
```

## Groups

A group is a list of identifiers separated by commas. A respondent belongs to a group
if their answers contain all the identifiers of the group. The order of the identifiers
matters only for the report: every prefix of a group is reported too, and the
percentage of each group is computed relative to the prefix without its last
identifier.

For example, `-g p2:r1,p3:r1,p4:r3` reports:
- `p2:r1`: the respondents who answered `p2:r1`, relative to all respondents;
- `p2:r1,p3:r1`: those who also answered `p3:r1`, relative to `p2:r1`;
- `p2:r1,p3:r1,p4:r3`: those who also answered `p4:r3`, relative to `p2:r1,p3:r1`.

Groups that share a prefix are reported once per distinct path, and the report is
sorted by path.

Identifiers that do not exist in the survey (for example when the groups were written
for another version of the file) are reported with a warning. The groups that use
them are kept in the report with a count of 0.

## Input formats

* `csv` Comma Separated Values, with double quotes around values that contain commas
or line breaks. The first line is the header.
* `xlsx` Excel workbooks, as exported by Google Forms or Microsoft Forms. The first
worksheet is used unless `--excel-worksheet-name` says otherwise.

When `--input-type` is not given, it is derived from the extension of the file.

## Configuration

All the options can also be stored in a JSON file passed with `--config`:

```json
{
  "outputSettings": {
    "surveyName": "Recycling habits 2022",
    "outputFile": "summary.json"
  },
  "surveyFile": {
    "provider": "csv",
    "filePath": "encuesta.csv",
    "firstQuestionColumnIndex": 2,
    "ignoredTrailingColumns": 0
  },
  "groups": ["p1:r1", "p2:r1,p3:r1,p4:r3"]
}
```

- `filePath` and `outputFile` are relative to the directory of the configuration file.
- `firstQuestionColumnIndex` (default 2) is the 1-based column of the first question.
- `ignoredTrailingColumns` (default 0) drops columns at the end of each line, such as a
trailing comment column.
- `excelWorksheetName` selects a worksheet for the `xlsx` provider.

The flags passed on the command line take precedence over the configuration file.

## Output

The report prints one line per group, indented by depth. With `--out`, a JSON summary
is written as well. It can be compared against an older summary with `--reference`,
in which case any difference is printed and the program fails.

*/
