/*!

This is the long-form manual for `contest_pivot` and `ncpivot`.

## Input formats

The following formats are supported:
* `tsv` tab-delimited results extracts (default)
* `xlsx` the same extract saved as an Excel workbook

### `tsv`

Precinct-level results extracts, one row per precinct, candidate and voting
method. The first row holds the column names. The following columns are
required, in any order; other columns are ignored:

```text
county_id  election_dt  result_type_lbl  contest_title  contest_party_lbl
precinct_code  candidate_name  candidate_party_lbl  vote_ct
```

Invalid UTF-8 sequences are replaced rather than rejected. A `vote_ct` that is
not a number keeps its row in the contest but does not count in any total.

### `xlsx`

The same columns, with the header in the first row of a worksheet. The first
worksheet is used unless `--excel-worksheet-name` is given.

## Row corrections

Before anything else:
 - rows with a `result_type_lbl` of `WRI` are renamed `Write-In`
 - commas are removed from candidate names
 - `OVER VOTE(S)` and `UNDER VOTE(S)` (any case) become `over` and `under`

## Winners file

The number of seats of a contest (its `pick`) is read from a text file:

```text
year 2024
WAKE COUNTY COMMISSIONER (VOTE FOR 2)
year 2022
WAKE COUNTY BOARD OF EDUCATION (VOTE FOR 3)
```

The contest names are the raw titles of the extract. Contests that are not
listed have a pick of 1.

## Outputs

For an input file `results_2024.txt`, the program writes:
 - one CSV file per contest, `results_2024_<display name>.csv`, with the precincts
   as rows and the candidates as columns. Candidates and precincts without any
   vote are removed.
 - one index `results_2024.json`:

```json
{
  "contests": [
    {
      "name": "Cary Council 1",
      "csv_file": "results_2024_Cary_Council_1.csv",
      "year": 2024,
      "tags": ["local"],
      "pick": 1,
      "candidates": [
        {
          "name": "Jane Doe",
          "political_party": "",
          "votes": 1200,
          "total_votes": 2000,
          "percent": 60.0,
          "total": "all"
        }
      ]
    }
  ]
}
```

The percentages are computed over the votes of all the candidates except
`over` and `under`.

## Configuration

All the options of the command line may also be given in a JSON file with
`--config`. Options on the command line take precedence.

```json
{
  "inputs": ["raw/results_2024.txt"],
  "outputDirectory": "out",
  "winnersFile": "winners.txt",
  "excludedContests": ["DURHAM", "ANGIER"],
  "inputType": "tsv",
  "excelWorksheetName": null
}
```

Relative paths are relative to the directory of the configuration file.

 */
